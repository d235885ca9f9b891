use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    context::RequestContext,
    entity::prelude::*,
    error::{require_text, CoreError, CoreResult},
    ids::{AttachmentId, ClassroomId, ForumId, GroupId, PostId, TenantId, ThreadId, UserId},
    service::{
        cascade::{CascadeDeleter, DeletionSummary},
        for_update,
        groups::find_group,
    },
};

/// Where a thread lives. Forum and classroom threads share one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Container {
    Forum(ForumId),
    Classroom(ClassroomId),
}

impl Container {
    pub fn kind(&self) -> ContainerKind {
        match self {
            Container::Forum(_) => ContainerKind::Forum,
            Container::Classroom(_) => ContainerKind::Classroom,
        }
    }

    /// Reads the container back from a stored thread row.
    pub fn of(thread: &ThreadModel) -> CoreResult<Self> {
        match (thread.container_kind, thread.forum_id, thread.classroom_id) {
            (ContainerKind::Forum, Some(forum_id), None) => Ok(Container::Forum(forum_id)),
            (ContainerKind::Classroom, None, Some(classroom_id)) => {
                Ok(Container::Classroom(classroom_id))
            }
            _ => Err(CoreError::InvalidState(format!(
                "thread {} has inconsistent container columns",
                thread.id
            ))),
        }
    }
}

/// File metadata only; bytes are stored elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAttachment {
    pub filename: String,
    pub filepath: String,
}

impl NewAttachment {
    pub(crate) fn validate(&self) -> CoreResult<()> {
        require_text("attachment filename", &self.filename)?;
        require_text("attachment filepath", &self.filepath)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewThread {
    pub title: String,
    pub thread_type: String,
    pub body: String,
    pub group_scope: Option<GroupId>,
    pub attachment: Option<NewAttachment>,
}

/// What happened to the thread when a post was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PostRemoval {
    Reply,
    /// The main post was removed and this post took its place.
    MainPromoted(PostId),
    /// The removed post was the last one; the thread now has no posts.
    ThreadEmptied,
}

pub(crate) async fn find_thread<C: ConnectionTrait>(
    conn: &C,
    tenant_id: TenantId,
    thread_id: ThreadId,
) -> CoreResult<ThreadModel> {
    Thread::find_by_id(thread_id)
        .filter(ThreadColumn::TenantId.eq(tenant_id))
        .one(conn)
        .await?
        .ok_or(CoreError::not_found("thread"))
}

async fn lock_thread<C: ConnectionTrait>(
    conn: &C,
    tenant_id: TenantId,
    thread_id: ThreadId,
) -> CoreResult<Option<ThreadModel>> {
    let select = Thread::find_by_id(thread_id).filter(ThreadColumn::TenantId.eq(tenant_id));
    Ok(for_update(select, conn).one(conn).await?)
}

/// Posts are only reachable through a thread of the caller's tenant.
async fn find_post<C: ConnectionTrait>(
    conn: &C,
    tenant_id: TenantId,
    post_id: PostId,
) -> CoreResult<(PostModel, ThreadModel)> {
    let post = Post::find_by_id(post_id)
        .one(conn)
        .await?
        .ok_or(CoreError::not_found("post"))?;

    let thread = Thread::find_by_id(post.thread_id)
        .filter(ThreadColumn::TenantId.eq(tenant_id))
        .one(conn)
        .await?
        .ok_or(CoreError::not_found("post"))?;

    Ok((post, thread))
}

async fn ensure_container<C: ConnectionTrait>(
    conn: &C,
    tenant_id: TenantId,
    container: Container,
) -> CoreResult<()> {
    let found = match container {
        Container::Forum(forum_id) => {
            Forum::find_by_id(forum_id)
                .filter(ForumColumn::TenantId.eq(tenant_id))
                .count(conn)
                .await?
        }
        Container::Classroom(classroom_id) => {
            Classroom::find_by_id(classroom_id)
                .filter(ClassroomColumn::TenantId.eq(tenant_id))
                .count(conn)
                .await?
        }
    };

    if found == 0 {
        return Err(CoreError::not_found(match container {
            Container::Forum(_) => "forum",
            Container::Classroom(_) => "classroom",
        }));
    }
    Ok(())
}

/// Appends a post to `thread`. The first post of a thread with no main post
/// becomes its main post.
pub(crate) async fn append_post<C: ConnectionTrait>(
    conn: &C,
    thread: ThreadModel,
    author_id: UserId,
    body: String,
    attachment: Option<NewAttachment>,
) -> CoreResult<(ThreadModel, PostModel)> {
    let kind = match thread.main_post_id {
        None => PostKind::Main,
        Some(_) => PostKind::Reply,
    };
    let seq = thread.next_post_seq;

    let post = PostActiveModel {
        id: Set(PostId::new()),
        thread_id: Set(thread.id),
        kind: Set(kind),
        author_id: Set(author_id),
        body: Set(body),
        created_at: Set(Utc::now()),
        seq: Set(seq),
        edited_at: Set(None),
    }
    .insert(conn)
    .await?;

    if let Some(attachment) = attachment {
        PostAttachmentActiveModel {
            id: Set(AttachmentId::new()),
            post_id: Set(post.id),
            filename: Set(attachment.filename),
            filepath: Set(attachment.filepath),
        }
        .insert(conn)
        .await?;
    }

    let mut active: ThreadActiveModel = thread.into();
    active.next_post_seq = Set(seq + 1);
    if kind == PostKind::Main {
        active.main_post_id = Set(Some(post.id));
    }
    let thread = active.update(conn).await?;

    Ok((thread, post))
}

#[derive(Clone)]
pub struct DiscussionsService {
    db: DatabaseConnection,
    cascade: CascadeDeleter,
}

impl DiscussionsService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            cascade: CascadeDeleter::new(db.clone()),
            db,
        }
    }

    /// Creates a thread and its main post in one transaction.
    #[instrument(skip(self, ctx, new_thread), fields(tenant = %ctx.tenant_id, user = %ctx.user_id), err)]
    pub async fn create_thread(
        &self,
        ctx: &RequestContext,
        container: Container,
        new_thread: NewThread,
    ) -> CoreResult<(ThreadModel, PostModel)> {
        let NewThread {
            title,
            thread_type,
            body,
            group_scope,
            attachment,
        } = new_thread;

        require_text("thread title", &title)?;
        require_text("thread type", &thread_type)?;
        require_text("post body", &body)?;
        if let Some(attachment) = &attachment {
            attachment.validate()?;
        }

        let txn = self.db.begin().await?;

        ensure_container(&txn, ctx.tenant_id, container).await?;
        if let Some(group_id) = group_scope {
            find_group(&txn, ctx.tenant_id, group_id).await?;
        }

        let (forum_id, classroom_id) = match container {
            Container::Forum(forum_id) => (Some(forum_id), None),
            Container::Classroom(classroom_id) => (None, Some(classroom_id)),
        };

        let thread = ThreadActiveModel {
            id: Set(ThreadId::new()),
            tenant_id: Set(ctx.tenant_id),
            container_kind: Set(container.kind()),
            forum_id: Set(forum_id),
            classroom_id: Set(classroom_id),
            group_id: Set(group_scope),
            title: Set(title),
            thread_type: Set(thread_type),
            main_post_id: Set(None),
            next_post_seq: Set(0),
            created_by: Set(ctx.user_id),
            created_at: Set(Utc::now()),
        }
        .insert(&txn)
        .await?;

        let (thread, post) = append_post(&txn, thread, ctx.user_id, body, attachment).await?;

        txn.commit().await?;
        Ok((thread, post))
    }

    /// Adds a reply, or a new main post when the thread has been emptied.
    #[instrument(skip(self, ctx, body, attachment), fields(tenant = %ctx.tenant_id, user = %ctx.user_id), err)]
    pub async fn add_reply(
        &self,
        ctx: &RequestContext,
        thread_id: ThreadId,
        body: String,
        attachment: Option<NewAttachment>,
    ) -> CoreResult<PostModel> {
        require_text("post body", &body)?;
        if let Some(attachment) = &attachment {
            attachment.validate()?;
        }

        let txn = self.db.begin().await?;

        let thread = lock_thread(&txn, ctx.tenant_id, thread_id)
            .await?
            .ok_or(CoreError::not_found("thread"))?;
        let (_, post) = append_post(&txn, thread, ctx.user_id, body, attachment).await?;

        txn.commit().await?;
        Ok(post)
    }

    /// Removes a post and its attachments. Removing the main post promotes
    /// the oldest surviving post, or leaves the thread empty.
    #[instrument(skip(self, ctx), fields(tenant = %ctx.tenant_id), err)]
    pub async fn delete_post(&self, ctx: &RequestContext, post_id: PostId) -> CoreResult<PostRemoval> {
        let txn = self.db.begin().await?;

        let thread_id = Post::find_by_id(post_id)
            .one(&txn)
            .await?
            .ok_or(CoreError::not_found("post"))?
            .thread_id;
        let thread = lock_thread(&txn, ctx.tenant_id, thread_id)
            .await?
            .ok_or(CoreError::not_found("post"))?;

        // Kind and existence are only trusted once read under the thread lock;
        // a concurrent delete may have promoted or removed the post meanwhile.
        let post = Post::find_by_id(post_id)
            .filter(PostColumn::ThreadId.eq(thread.id))
            .one(&txn)
            .await?
            .ok_or(CoreError::not_found("post"))?;

        let is_main = thread.main_post_id == Some(post.id);
        if is_main != (post.kind == PostKind::Main) {
            return Err(CoreError::InvalidState(format!(
                "post {} is {:?} but thread {} points at {:?}",
                post.id, post.kind, thread.id, thread.main_post_id
            )));
        }

        PostAttachment::delete_many()
            .filter(PostAttachmentColumn::PostId.eq(post.id))
            .exec(&txn)
            .await?;

        let removal = if is_main {
            let successor = Post::find()
                .filter(PostColumn::ThreadId.eq(thread.id))
                .filter(PostColumn::Id.ne(post.id))
                .order_by_asc(PostColumn::CreatedAt)
                .order_by_asc(PostColumn::Seq)
                .one(&txn)
                .await?;

            let mut active: ThreadActiveModel = thread.into();
            match successor {
                Some(next) => {
                    let next_id = next.id;
                    active.main_post_id = Set(Some(next_id));
                    active.update(&txn).await?;

                    let mut promoted: PostActiveModel = next.into();
                    promoted.kind = Set(PostKind::Main);
                    promoted.update(&txn).await?;

                    PostRemoval::MainPromoted(next_id)
                }
                None => {
                    active.main_post_id = Set(None);
                    active.update(&txn).await?;

                    PostRemoval::ThreadEmptied
                }
            }
        } else {
            PostRemoval::Reply
        };

        Post::delete_by_id(post.id).exec(&txn).await?;

        txn.commit().await?;

        if removal == PostRemoval::ThreadEmptied {
            info!(thread = %post.thread_id, "last post removed, thread kept empty");
        }
        Ok(removal)
    }

    #[instrument(skip(self, ctx, body), fields(tenant = %ctx.tenant_id), err)]
    pub async fn edit_post(
        &self,
        ctx: &RequestContext,
        post_id: PostId,
        body: String,
    ) -> CoreResult<PostModel> {
        require_text("post body", &body)?;

        let (post, _) = find_post(&self.db, ctx.tenant_id, post_id).await?;

        let mut active: PostActiveModel = post.into();
        active.body = Set(body);
        active.edited_at = Set(Some(Utc::now()));

        Ok(active.update(&self.db).await?)
    }

    #[instrument(skip(self, ctx, title), fields(tenant = %ctx.tenant_id), err)]
    pub async fn edit_thread_title(
        &self,
        ctx: &RequestContext,
        thread_id: ThreadId,
        title: String,
    ) -> CoreResult<ThreadModel> {
        require_text("thread title", &title)?;

        let thread = find_thread(&self.db, ctx.tenant_id, thread_id).await?;

        let mut active: ThreadActiveModel = thread.into();
        active.title = Set(title);

        Ok(active.update(&self.db).await?)
    }

    pub async fn delete_thread(
        &self,
        ctx: &RequestContext,
        thread_id: ThreadId,
    ) -> CoreResult<DeletionSummary> {
        self.cascade.delete_thread(ctx, thread_id).await
    }

    pub async fn get_thread(&self, ctx: &RequestContext, thread_id: ThreadId) -> CoreResult<ThreadModel> {
        find_thread(&self.db, ctx.tenant_id, thread_id).await
    }

    pub async fn list_threads(
        &self,
        ctx: &RequestContext,
        container: Container,
    ) -> CoreResult<Vec<ThreadModel>> {
        let select = Thread::find().filter(ThreadColumn::TenantId.eq(ctx.tenant_id));
        let select = match container {
            Container::Forum(forum_id) => select.filter(ThreadColumn::ForumId.eq(forum_id)),
            Container::Classroom(classroom_id) => {
                select.filter(ThreadColumn::ClassroomId.eq(classroom_id))
            }
        };

        Ok(select
            .order_by_asc(ThreadColumn::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Posts of a thread, main post first, then in creation order.
    pub async fn list_posts(&self, ctx: &RequestContext, thread_id: ThreadId) -> CoreResult<Vec<PostModel>> {
        let thread = find_thread(&self.db, ctx.tenant_id, thread_id).await?;

        Ok(Post::find()
            .filter(PostColumn::ThreadId.eq(thread.id))
            .order_by_asc(PostColumn::CreatedAt)
            .order_by_asc(PostColumn::Seq)
            .all(&self.db)
            .await?)
    }

    pub async fn list_attachments(
        &self,
        ctx: &RequestContext,
        post_id: PostId,
    ) -> CoreResult<Vec<PostAttachmentModel>> {
        let (post, _) = find_post(&self.db, ctx.tenant_id, post_id).await?;

        Ok(PostAttachment::find()
            .filter(PostAttachmentColumn::PostId.eq(post.id))
            .all(&self.db)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::forums::ForumsService;
    use crate::test_utils::*;

    struct Fixture {
        db: DatabaseConnection,
        ctx: RequestContext,
        service: DiscussionsService,
        forum_id: ForumId,
    }

    async fn setup_fixture() -> Fixture {
        let db = setup_test_db().await;
        let ctx = create_test_tenant(&db).await;
        let forum = ForumsService::new(db.clone())
            .create_forum(&ctx, "General".to_string(), None)
            .await
            .unwrap();

        Fixture {
            service: DiscussionsService::new(db.clone()),
            db,
            ctx,
            forum_id: forum.id,
        }
    }

    fn new_thread(body: &str) -> NewThread {
        NewThread {
            title: "Welcome".to_string(),
            thread_type: "discussion".to_string(),
            body: body.to_string(),
            group_scope: None,
            attachment: None,
        }
    }

    async fn main_post_count(db: &DatabaseConnection, thread_id: ThreadId) -> u64 {
        Post::find()
            .filter(PostColumn::ThreadId.eq(thread_id))
            .filter(PostColumn::Kind.eq(PostKind::Main))
            .count(db)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_thread_sets_main_post() {
        let f = setup_fixture().await;

        let (thread, post) = f
            .service
            .create_thread(&f.ctx, Container::Forum(f.forum_id), new_thread("Hello"))
            .await
            .expect("Failed to create thread");

        assert_eq!(thread.main_post_id, Some(post.id));
        assert_eq!(post.kind, PostKind::Main);
        assert_eq!(thread.container_kind, ContainerKind::Forum);
        assert_eq!(Container::of(&thread).unwrap(), Container::Forum(f.forum_id));
        assert_eq!(main_post_count(&f.db, thread.id).await, 1);
    }

    #[tokio::test]
    async fn test_create_thread_validates_input() {
        let f = setup_fixture().await;

        let blank_body = f
            .service
            .create_thread(&f.ctx, Container::Forum(f.forum_id), new_thread("   "))
            .await;
        assert!(matches!(blank_body, Err(CoreError::Validation(_))));

        let missing_forum = f
            .service
            .create_thread(&f.ctx, Container::Forum(ForumId::new()), new_thread("Hi"))
            .await;
        assert!(matches!(missing_forum, Err(CoreError::NotFound { entity: "forum" })));

        let mut scoped = new_thread("Hi");
        scoped.group_scope = Some(GroupId::new());
        let missing_group = f
            .service
            .create_thread(&f.ctx, Container::Forum(f.forum_id), scoped)
            .await;
        assert!(matches!(missing_group, Err(CoreError::NotFound { entity: "group" })));

        assert_eq!(Thread::find().count(&f.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_deleting_main_promotes_oldest_reply_each_time() {
        let f = setup_fixture().await;
        let (thread, t1) = f
            .service
            .create_thread(&f.ctx, Container::Forum(f.forum_id), new_thread("t1"))
            .await
            .unwrap();
        let t2 = f
            .service
            .add_reply(&f.ctx, thread.id, "t2".to_string(), None)
            .await
            .unwrap();
        let t3 = f
            .service
            .add_reply(&f.ctx, thread.id, "t3".to_string(), None)
            .await
            .unwrap();
        assert_eq!(t2.kind, PostKind::Reply);

        let removal = f.service.delete_post(&f.ctx, t1.id).await.unwrap();
        assert_eq!(removal, PostRemoval::MainPromoted(t2.id));
        let thread_now = f.service.get_thread(&f.ctx, thread.id).await.unwrap();
        assert_eq!(thread_now.main_post_id, Some(t2.id));
        assert_eq!(main_post_count(&f.db, thread.id).await, 1);

        let removal = f.service.delete_post(&f.ctx, t2.id).await.unwrap();
        assert_eq!(removal, PostRemoval::MainPromoted(t3.id));

        let removal = f.service.delete_post(&f.ctx, t3.id).await.unwrap();
        assert_eq!(removal, PostRemoval::ThreadEmptied);

        let thread_now = f.service.get_thread(&f.ctx, thread.id).await.unwrap();
        assert_eq!(thread_now.main_post_id, None);
        assert!(f.service.list_posts(&f.ctx, thread.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_public_forum_thread_lifecycle() {
        let f = setup_fixture().await;
        let (thread, m1) = f
            .service
            .create_thread(&f.ctx, Container::Forum(f.forum_id), new_thread("M1"))
            .await
            .unwrap();
        let r1 = f
            .service
            .add_reply(&f.ctx, thread.id, "R1".to_string(), None)
            .await
            .unwrap();

        f.service.delete_post(&f.ctx, m1.id).await.unwrap();
        let thread_now = f.service.get_thread(&f.ctx, thread.id).await.unwrap();
        assert_eq!(thread_now.main_post_id, Some(r1.id));

        f.service.delete_post(&f.ctx, r1.id).await.unwrap();
        assert_eq!(
            Post::find()
                .filter(PostColumn::ThreadId.eq(thread.id))
                .count(&f.db)
                .await
                .unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_delete_post_uses_state_current_at_lock_time() {
        let f = setup_fixture().await;
        let (thread, main) = f
            .service
            .create_thread(&f.ctx, Container::Forum(f.forum_id), new_thread("M"))
            .await
            .unwrap();
        let reply = f
            .service
            .add_reply(&f.ctx, thread.id, "R".to_string(), None)
            .await
            .unwrap();
        assert_eq!(reply.kind, PostKind::Reply);

        let removal = f.service.delete_post(&f.ctx, main.id).await.unwrap();
        assert_eq!(removal, PostRemoval::MainPromoted(reply.id));

        // A second delete of the removed main post finds nothing.
        let again = f.service.delete_post(&f.ctx, main.id).await;
        assert!(matches!(again, Err(CoreError::NotFound { entity: "post" })));

        // The copy of `reply` held by the caller still says Reply; the stored
        // row is now the main post and is removed as such.
        let removal = f.service.delete_post(&f.ctx, reply.id).await.unwrap();
        assert_eq!(removal, PostRemoval::ThreadEmptied);

        let thread_now = f.service.get_thread(&f.ctx, thread.id).await.unwrap();
        assert_eq!(thread_now.main_post_id, None);
        assert_eq!(main_post_count(&f.db, thread.id).await, 0);
    }

    #[tokio::test]
    async fn test_reply_to_empty_thread_becomes_main() {
        let f = setup_fixture().await;
        let (thread, main) = f
            .service
            .create_thread(&f.ctx, Container::Forum(f.forum_id), new_thread("first"))
            .await
            .unwrap();
        f.service.delete_post(&f.ctx, main.id).await.unwrap();

        let revived = f
            .service
            .add_reply(&f.ctx, thread.id, "again".to_string(), None)
            .await
            .unwrap();

        assert_eq!(revived.kind, PostKind::Main);
        let thread_now = f.service.get_thread(&f.ctx, thread.id).await.unwrap();
        assert_eq!(thread_now.main_post_id, Some(revived.id));
    }

    #[tokio::test]
    async fn test_delete_reply_removes_its_attachment() {
        let f = setup_fixture().await;
        let (thread, main) = f
            .service
            .create_thread(&f.ctx, Container::Forum(f.forum_id), new_thread("main"))
            .await
            .unwrap();
        let reply = f
            .service
            .add_reply(
                &f.ctx,
                thread.id,
                "see attached".to_string(),
                Some(NewAttachment {
                    filename: "notes.txt".to_string(),
                    filepath: "uploads/notes.txt".to_string(),
                }),
            )
            .await
            .unwrap();
        assert_eq!(f.service.list_attachments(&f.ctx, reply.id).await.unwrap().len(), 1);

        let removal = f.service.delete_post(&f.ctx, reply.id).await.unwrap();
        assert_eq!(removal, PostRemoval::Reply);
        assert_eq!(PostAttachment::find().count(&f.db).await.unwrap(), 0);

        let thread_now = f.service.get_thread(&f.ctx, thread.id).await.unwrap();
        assert_eq!(thread_now.main_post_id, Some(main.id));
    }

    #[tokio::test]
    async fn test_posts_listed_in_creation_order() {
        let f = setup_fixture().await;
        let (thread, main) = f
            .service
            .create_thread(&f.ctx, Container::Forum(f.forum_id), new_thread("a"))
            .await
            .unwrap();
        let mut expected = vec![main.id];
        for body in ["b", "c", "d"] {
            let post = f
                .service
                .add_reply(&f.ctx, thread.id, body.to_string(), None)
                .await
                .unwrap();
            expected.push(post.id);
        }

        let listed: Vec<PostId> = f
            .service
            .list_posts(&f.ctx, thread.id)
            .await
            .unwrap()
            .into_iter()
            .map(|post| post.id)
            .collect();
        assert_eq!(listed, expected);
    }

    #[tokio::test]
    async fn test_edits_update_body_and_title() {
        let f = setup_fixture().await;
        let (thread, main) = f
            .service
            .create_thread(&f.ctx, Container::Forum(f.forum_id), new_thread("draft"))
            .await
            .unwrap();

        let edited = f
            .service
            .edit_post(&f.ctx, main.id, "final".to_string())
            .await
            .unwrap();
        assert_eq!(edited.body, "final");
        assert!(edited.edited_at.is_some());

        let renamed = f
            .service
            .edit_thread_title(&f.ctx, thread.id, "Renamed".to_string())
            .await
            .unwrap();
        assert_eq!(renamed.title, "Renamed");

        let blank = f.service.edit_thread_title(&f.ctx, thread.id, "".to_string()).await;
        assert!(matches!(blank, Err(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_posts_hidden_across_tenants() {
        let f = setup_fixture().await;
        let other = create_test_tenant(&f.db).await;
        let (thread, main) = f
            .service
            .create_thread(&f.ctx, Container::Forum(f.forum_id), new_thread("mine"))
            .await
            .unwrap();

        let result = f.service.delete_post(&other, main.id).await;
        assert!(matches!(result, Err(CoreError::NotFound { entity: "post" })));

        let result = f.service.add_reply(&other, thread.id, "hi".to_string(), None).await;
        assert!(matches!(result, Err(CoreError::NotFound { entity: "thread" })));

        assert_eq!(Post::find().count(&f.db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_thread_through_engine() {
        let f = setup_fixture().await;
        let (thread, _) = f
            .service
            .create_thread(&f.ctx, Container::Forum(f.forum_id), new_thread("bye"))
            .await
            .unwrap();
        f.service
            .add_reply(&f.ctx, thread.id, "reply".to_string(), None)
            .await
            .unwrap();

        let summary = f.service.delete_thread(&f.ctx, thread.id).await.unwrap();
        assert_eq!(summary.threads, 1);
        assert_eq!(summary.posts, 2);
        assert!(f
            .service
            .list_threads(&f.ctx, Container::Forum(f.forum_id))
            .await
            .unwrap()
            .is_empty());
    }
}
