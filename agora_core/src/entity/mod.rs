// SeaORM entities, one module per table.
pub mod administration;
pub mod assignment;
pub mod batch;
pub mod classroom;
pub mod custom_group;
pub mod custom_group_member;
pub mod department;
pub mod forum;
pub mod group;
pub mod group_batch;
pub mod group_department;
pub mod permission;
pub mod post;
pub mod post_attachment;
pub mod role;
pub mod role_permission;
pub mod submission;
pub mod submission_attachment;
pub mod thread;
pub mod user;


pub mod prelude {
    pub use super::administration::{
        ActiveModel as AdministrationActiveModel, Column as AdministrationColumn, Entity as Administration,
        Model as AdministrationModel,
    };
    pub use super::assignment::{
        ActiveModel as AssignmentActiveModel, Column as AssignmentColumn, Entity as Assignment,
        Model as AssignmentModel,
    };
    pub use super::batch::{
        ActiveModel as BatchActiveModel, Column as BatchColumn, Entity as Batch,
        Model as BatchModel,
    };
    pub use super::classroom::{
        ActiveModel as ClassroomActiveModel, Column as ClassroomColumn, Entity as Classroom,
        Model as ClassroomModel,
    };
    pub use super::custom_group::{
        ActiveModel as CustomGroupActiveModel, Column as CustomGroupColumn, Entity as CustomGroup,
        Model as CustomGroupModel,
    };
    pub use super::custom_group_member::{
        ActiveModel as CustomGroupMemberActiveModel, Column as CustomGroupMemberColumn, Entity as CustomGroupMember,
        Model as CustomGroupMemberModel,
    };
    pub use super::department::{
        ActiveModel as DepartmentActiveModel, Column as DepartmentColumn, Entity as Department,
        Model as DepartmentModel,
    };
    pub use super::forum::{
        ActiveModel as ForumActiveModel, Column as ForumColumn, Entity as Forum,
        Model as ForumModel,
    };
    pub use super::group::{
        ActiveModel as GroupActiveModel, Column as GroupColumn, Entity as Group,
        Model as GroupModel,
    };
    pub use super::group_batch::{
        ActiveModel as GroupBatchActiveModel, Column as GroupBatchColumn, Entity as GroupBatch,
        Model as GroupBatchModel,
    };
    pub use super::group_department::{
        ActiveModel as GroupDepartmentActiveModel, Column as GroupDepartmentColumn, Entity as GroupDepartment,
        Model as GroupDepartmentModel,
    };
    pub use super::permission::{
        ActiveModel as PermissionActiveModel, Column as PermissionColumn, Entity as Permission,
        Model as PermissionModel,
    };
    pub use super::post::{
        ActiveModel as PostActiveModel, Column as PostColumn, Entity as Post,
        Model as PostModel,
    };
    pub use super::post_attachment::{
        ActiveModel as PostAttachmentActiveModel, Column as PostAttachmentColumn, Entity as PostAttachment,
        Model as PostAttachmentModel,
    };
    pub use super::role::{
        ActiveModel as RoleActiveModel, Column as RoleColumn, Entity as Role,
        Model as RoleModel,
    };
    pub use super::role_permission::{
        ActiveModel as RolePermissionActiveModel, Column as RolePermissionColumn, Entity as RolePermission,
        Model as RolePermissionModel,
    };
    pub use super::submission::{
        ActiveModel as SubmissionActiveModel, Column as SubmissionColumn, Entity as Submission,
        Model as SubmissionModel,
    };
    pub use super::submission_attachment::{
        ActiveModel as SubmissionAttachmentActiveModel, Column as SubmissionAttachmentColumn, Entity as SubmissionAttachment,
        Model as SubmissionAttachmentModel,
    };
    pub use super::thread::{
        ActiveModel as ThreadActiveModel, Column as ThreadColumn, Entity as Thread,
        Model as ThreadModel,
    };
    pub use super::user::{
        ActiveModel as UserActiveModel, Column as UserColumn, Entity as User,
        Model as UserModel,
    };

    pub use super::group::GroupKind;
    pub use super::post::PostKind;
    pub use super::thread::ContainerKind;
    pub use super::user::UserKind;

    // Re-export commonly used SeaORM types and traits
    pub use sea_orm::{
        ActiveModelTrait,
        ActiveValue,
        ColumnTrait,
        ConnectionTrait,
        Condition,

        // Database and connection types
        Database,
        DatabaseConnection,
        DatabaseTransaction,
        DbConn,
        DbErr,

        // Core traits
        EntityTrait,
        ModelTrait,
        NotSet,
        PaginatorTrait,
        QueryFilter,
        QueryOrder,
        QuerySelect,
        Related,
        RelationTrait,
        Set,
        TransactionTrait,
        Unchanged,
    };
}
