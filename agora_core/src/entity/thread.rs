use crate::ids::{ClassroomId, ForumId, GroupId, PostId, TenantId, ThreadId, UserId};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    #[sea_orm(string_value = "forum")]
    Forum,
    #[sea_orm(string_value = "classroom")]
    Classroom,
}

/// A discussion thread. Exactly one of `forum_id`/`classroom_id` is set and it
/// matches `container_kind`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "thread")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: ThreadId,
    pub tenant_id: TenantId,
    pub container_kind: ContainerKind,
    pub forum_id: Option<ForumId>,
    pub classroom_id: Option<ClassroomId>,
    pub group_id: Option<GroupId>,
    pub title: String,
    pub thread_type: String,
    /// Null only while the thread has no posts.
    pub main_post_id: Option<PostId>,
    /// Next value handed out as `post.seq`.
    pub next_post_seq: i64,
    pub created_by: UserId,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::forum::Entity",
        from = "Column::ForumId",
        to = "super::forum::Column::Id"
    )]
    Forum,
    #[sea_orm(
        belongs_to = "super::classroom::Entity",
        from = "Column::ClassroomId",
        to = "super::classroom::Column::Id"
    )]
    Classroom,
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::forum::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Forum.def()
    }
}

impl Related<super::classroom::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classroom.def()
    }
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
