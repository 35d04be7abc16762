use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub email: String,
    pub name: String,

    pub password_hash: String,
}

/// Identity of the authenticated caller; carries only what the token proves.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: ObjectId,
}
