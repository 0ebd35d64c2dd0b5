#[derive(Debug, Clone)]
pub struct Comment {
    pub id: i32,
    pub story_id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub text: String,
    pub likes: i32,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub story_id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub text: String,
}
