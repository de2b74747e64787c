use async_trait::async_trait;
use chrono::Utc;
use forum_server::{
    models::{NewTopic, Post, PostFields, Topic, User},
    repository::Repository,
};
use std::sync::Mutex;
use uuid::Uuid;

/// A stateful `Repository` implementation so handler tests can assert on
/// what was (or was not) persisted. Vec order doubles as creation order.
#[derive(Default)]
pub struct InMemoryRepository {
    pub topics: Mutex<Vec<Topic>>,
    pub posts: Mutex<Vec<Post>>,
    pub users: Mutex<Vec<User>>,
}

impl InMemoryRepository {
    pub fn seed_user(&self, email: &str, role: &str) -> User {
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: "unused-in-these-tests".to_string(),
            role: role.to_string(),
            created_at: Utc::now(),
        };
        self.users.lock().unwrap().push(user.clone());
        user
    }

    pub fn seed_topic(&self, title: &str, description: &str) -> Topic {
        let topic = Topic {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.to_string(),
            created_at: Utc::now(),
        };
        self.topics.lock().unwrap().push(topic.clone());
        topic
    }

    pub fn seed_post(&self, topic: &Topic, author: &User, title: &str, body: &str) -> Post {
        let post = Post {
            id: Uuid::new_v4(),
            topic_id: topic.id,
            user_id: author.id,
            title: title.to_string(),
            body: body.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.posts.lock().unwrap().push(post.clone());
        post
    }

    pub fn find_post_by_title(&self, title: &str) -> Option<Post> {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.title == title)
            .cloned()
    }

    pub fn find_post(&self, id: Uuid) -> Option<Post> {
        self.posts.lock().unwrap().iter().find(|p| p.id == id).cloned()
    }

    pub fn find_user_by_email_sync(&self, email: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn create_topic(&self, topic: NewTopic) -> Result<Topic, sqlx::Error> {
        Ok(self.seed_topic(&topic.title, &topic.description))
    }

    async fn get_topic(&self, id: Uuid) -> Result<Option<Topic>, sqlx::Error> {
        Ok(self.topics.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn list_topics(&self) -> Result<Vec<Topic>, sqlx::Error> {
        Ok(self.topics.lock().unwrap().clone())
    }

    async fn topic_posts(&self, topic_id: Uuid) -> Result<Vec<Post>, sqlx::Error> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.topic_id == topic_id)
            .cloned()
            .collect())
    }

    async fn count_posts(&self, topic_id: Uuid) -> Result<i64, sqlx::Error> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.topic_id == topic_id)
            .count() as i64)
    }

    async fn create_post(
        &self,
        topic_id: Uuid,
        user_id: Uuid,
        fields: PostFields,
    ) -> Result<Post, sqlx::Error> {
        let post = Post {
            id: Uuid::new_v4(),
            topic_id,
            user_id,
            title: fields.title,
            body: fields.body,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn get_post(&self, topic_id: Uuid, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == post_id && p.topic_id == topic_id)
            .cloned())
    }

    async fn update_post(&self, id: Uuid, fields: PostFields) -> Result<Option<Post>, sqlx::Error> {
        let mut posts = self.posts.lock().unwrap();
        match posts.iter_mut().find(|p| p.id == id) {
            Some(post) => {
                post.title = fields.title;
                post.body = fields.body;
                post.updated_at = Utc::now();
                Ok(Some(post.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_post(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() < before)
    }

    async fn create_user(
        &self,
        email: String,
        password_hash: String,
        role: String,
    ) -> Result<User, sqlx::Error> {
        let user = User {
            id: Uuid::new_v4(),
            email,
            password_hash,
            role,
            created_at: Utc::now(),
        };
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }
}
