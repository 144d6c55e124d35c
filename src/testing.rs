// src/testing.rs
//! In-memory doubles shared by the unit and handler tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{App, test, web};
use async_trait::async_trait;
use chrono::Utc;
use tempfile::TempDir;

use crate::auth::JwtService;
use crate::controllers;
use crate::models::announcement::{Announcement, NewAnnouncement, UploadedFile};
use crate::models::role::{DEFAULT_ROLES, Role};
use crate::models::study_rundown::{NewStudyRundown, StudyRundown};
use crate::models::user::{NewUser, User};
use crate::pagination::Pagination;
use crate::repositories::{
    AnnouncementRepository, RoleRepository, StudyRundownRepository, UserRepository,
};
use crate::services::{AnnouncementService, RoleService, StudyRundownService, UserService};
use crate::state::AppState;
use crate::storage::LocalStorage;
use crate::utils::generate_slug;

pub const JWT_SECRET: &str = "nurul-iman-test-secret";
pub const TEST_PASSWORD: &str = "bismillah";

const BOUNDARY: &str = "nurul-iman-test-boundary";

#[derive(Default)]
struct Tables {
    roles: Vec<Role>,
    users: Vec<User>,
    announcements: Vec<Announcement>,
    rundowns: Vec<StudyRundown>,
    last_id: u64,
}

impl Tables {
    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }

    fn user_name(&self, id: u64) -> sqlx::Result<String> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.name.clone())
            .ok_or(sqlx::Error::RowNotFound)
    }
}

/// Implements every repository over plain vectors. Lists follow the same
/// ordering as the MySQL queries.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    fn seeded() -> Self {
        let store = Self::default();
        {
            let mut tables = store.tables.lock().unwrap();
            for name in DEFAULT_ROLES {
                let id = tables.next_id();
                let now = Utc::now();
                tables.roles.push(Role {
                    id,
                    role_name: name.to_string(),
                    created_at: now,
                    updated_at: now,
                });
            }
        }
        store
    }

    fn check_writes(&self) -> sqlx::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }

    fn page<T: Clone>(rows: &[T], page: Pagination) -> (Vec<T>, i64) {
        let items = rows
            .iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect();
        (items, rows.len() as i64)
    }
}

#[async_trait]
impl RoleRepository for MemoryStore {
    async fn create_role(&self, role_name: &str) -> sqlx::Result<Role> {
        self.check_writes()?;
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        let now = Utc::now();
        let role = Role {
            id,
            role_name: role_name.to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.roles.push(role.clone());
        Ok(role)
    }

    async fn find_by_name(&self, role_name: &str) -> sqlx::Result<Option<Role>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.roles.iter().find(|r| r.role_name == role_name).cloned())
    }

    async fn list_roles(&self) -> sqlx::Result<Vec<Role>> {
        let mut roles = self.tables.lock().unwrap().roles.clone();
        roles.sort_by_key(|r| r.id);
        Ok(roles)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, user: NewUser) -> sqlx::Result<User> {
        self.check_writes()?;
        let mut tables = self.tables.lock().unwrap();
        let role_name = tables
            .roles
            .iter()
            .find(|r| r.id == user.role_id)
            .map(|r| r.role_name.clone())
            .ok_or(sqlx::Error::RowNotFound)?;
        let id = tables.next_id();
        let now = Utc::now();
        let user = User {
            id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role_id: user.role_id,
            role_name,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: u64) -> sqlx::Result<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> sqlx::Result<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_by_role(&self, role_name: &str) -> sqlx::Result<Vec<User>> {
        let tables = self.tables.lock().unwrap();
        let mut users: Vec<User> = tables
            .users
            .iter()
            .filter(|u| u.role_name == role_name)
            .cloned()
            .collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }
}

#[async_trait]
impl AnnouncementRepository for MemoryStore {
    async fn add_announcement(&self, announcement: NewAnnouncement) -> sqlx::Result<Announcement> {
        self.check_writes()?;
        let mut tables = self.tables.lock().unwrap();
        let author_name = tables.user_name(announcement.user_id)?;
        let id = tables.next_id();
        let now = Utc::now();
        let row = Announcement {
            id,
            title: announcement.title,
            description: announcement.description,
            images: announcement.images,
            user_id: announcement.user_id,
            author_name,
            slug: announcement.slug,
            created_at: now,
            updated_at: now,
        };
        tables.announcements.push(row.clone());
        Ok(row)
    }

    async fn detail_announcement(&self, id: u64) -> sqlx::Result<Option<Announcement>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.announcements.iter().find(|a| a.id == id).cloned())
    }

    async fn list_announcements(&self, page: Pagination) -> sqlx::Result<(Vec<Announcement>, i64)> {
        let mut rows = self.tables.lock().unwrap().announcements.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(Self::page(&rows, page))
    }

    async fn update_announcement(&self, announcement: &Announcement) -> sqlx::Result<Announcement> {
        self.check_writes()?;
        let mut tables = self.tables.lock().unwrap();
        let author_name = tables.user_name(announcement.user_id)?;
        let row = tables
            .announcements
            .iter_mut()
            .find(|a| a.id == announcement.id)
            .ok_or(sqlx::Error::RowNotFound)?;
        row.title = announcement.title.clone();
        row.description = announcement.description.clone();
        row.images = announcement.images.clone();
        row.user_id = announcement.user_id;
        row.author_name = author_name;
        row.slug = announcement.slug.clone();
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete_announcement(&self, id: u64) -> sqlx::Result<bool> {
        self.check_writes()?;
        let mut tables = self.tables.lock().unwrap();
        let before = tables.announcements.len();
        tables.announcements.retain(|a| a.id != id);
        Ok(tables.announcements.len() < before)
    }
}

#[async_trait]
impl StudyRundownRepository for MemoryStore {
    async fn add_rundown(&self, rundown: NewStudyRundown) -> sqlx::Result<StudyRundown> {
        self.check_writes()?;
        let mut tables = self.tables.lock().unwrap();
        let ustadz_name = tables.user_name(rundown.user_id)?;
        let id = tables.next_id();
        let now = Utc::now();
        let row = StudyRundown {
            id,
            title: rundown.title,
            on_scheduled: rundown.on_scheduled,
            schedule_date: rundown.schedule_date,
            time: rundown.time,
            user_id: rundown.user_id,
            ustadz_name,
            created_at: now,
            updated_at: now,
        };
        tables.rundowns.push(row.clone());
        Ok(row)
    }

    async fn detail_rundown(&self, id: u64) -> sqlx::Result<Option<StudyRundown>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.rundowns.iter().find(|r| r.id == id).cloned())
    }

    async fn list_rundowns(&self, page: Pagination) -> sqlx::Result<(Vec<StudyRundown>, i64)> {
        let mut rows = self.tables.lock().unwrap().rundowns.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(Self::page(&rows, page))
    }

    async fn update_rundown(&self, rundown: &StudyRundown) -> sqlx::Result<StudyRundown> {
        self.check_writes()?;
        let mut tables = self.tables.lock().unwrap();
        let ustadz_name = tables.user_name(rundown.user_id)?;
        let row = tables
            .rundowns
            .iter_mut()
            .find(|r| r.id == rundown.id)
            .ok_or(sqlx::Error::RowNotFound)?;
        row.title = rundown.title.clone();
        row.on_scheduled = rundown.on_scheduled;
        row.schedule_date = rundown.schedule_date.clone();
        row.time = rundown.time.clone();
        row.user_id = rundown.user_id;
        row.ustadz_name = ustadz_name;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete_rundown(&self, id: u64) -> sqlx::Result<bool> {
        self.check_writes()?;
        let mut tables = self.tables.lock().unwrap();
        let before = tables.rundowns.len();
        tables.rundowns.retain(|r| r.id != id);
        Ok(tables.rundowns.len() < before)
    }
}

/// Application state wired to the in-memory store and a temporary upload dir.
pub struct TestApp {
    store: Arc<MemoryStore>,
    storage: Arc<LocalStorage>,
    upload_dir: TempDir,
    jwt: JwtService,
    state: web::Data<AppState>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::seeded());
        let upload_dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(LocalStorage::new(upload_dir.path(), "/uploads"));
        let jwt = JwtService::new(JWT_SECRET, 1);

        let state = AppState {
            jwt: jwt.clone(),
            users: UserService::new(store.clone(), store.clone()).with_hash_cost(4),
            roles: RoleService::new(store.clone()),
            announcements: AnnouncementService::new(store.clone(), storage.clone()),
            rundowns: StudyRundownService::new(store.clone(), store.clone()),
        };

        Self {
            store,
            storage,
            upload_dir,
            jwt,
            state: web::Data::new(state),
        }
    }

    pub fn state(&self) -> web::Data<AppState> {
        self.state.clone()
    }

    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    /// Inserts a user holding `role` whose password is `TEST_PASSWORD`.
    pub fn user(&self, name: &str, role: &str) -> User {
        let mut tables = self.store.tables.lock().unwrap();
        let role = tables
            .roles
            .iter()
            .find(|r| r.role_name == role)
            .cloned()
            .unwrap();
        let id = tables.next_id();
        let now = Utc::now();
        let user = User {
            id,
            name: name.to_string(),
            email: format!("user{}@nuruliman.test", id),
            password_hash: bcrypt::hash(TEST_PASSWORD, 4).unwrap(),
            role_id: role.id,
            role_name: role.role_name,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        user
    }

    pub fn token_for(&self, user: &User) -> String {
        self.jwt.generate_token(user.id).unwrap()
    }

    pub fn bearer(&self, user: &User) -> String {
        format!("Bearer {}", self.token_for(user))
    }

    pub fn expired_bearer(&self, user: &User) -> String {
        let token = JwtService::new(JWT_SECRET, -2).generate_token(user.id).unwrap();
        format!("Bearer {}", token)
    }

    pub fn seed_announcement(&self, author: &User, title: &str) -> Announcement {
        let mut tables = self.store.tables.lock().unwrap();
        let id = tables.next_id();
        let now = Utc::now();
        let row = Announcement {
            id,
            title: title.to_string(),
            description: format!("{} di masjid Nurul Iman", title),
            images: String::new(),
            user_id: author.id,
            author_name: author.name.clone(),
            slug: generate_slug(title),
            created_at: now,
            updated_at: now,
        };
        tables.announcements.push(row.clone());
        row
    }

    pub fn fail_writes(&self, fail: bool) {
        self.store.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn announcement_count(&self) -> usize {
        self.store.tables.lock().unwrap().announcements.len()
    }

    pub fn rundown_count(&self) -> usize {
        self.store.tables.lock().unwrap().rundowns.len()
    }

    pub fn stored(&self, location: &str) -> bool {
        self.storage.path_for(location).is_some_and(|p| p.is_file())
    }

    pub fn stored_object_count(&self) -> usize {
        std::fs::read_dir(self.upload_dir.path())
            .map(|entries| entries.filter_map(Result::ok).count())
            .unwrap_or(0)
    }

    pub fn remove_object(&self, location: &str) {
        let path = self.storage.path_for(location).unwrap();
        std::fs::remove_file(path).unwrap();
    }
}

pub async fn init_app(
    ctx: &TestApp,
) -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(ctx.state())
            .configure(controllers::configure),
    )
    .await
}

pub fn png_banner(size: usize) -> UploadedFile {
    UploadedFile {
        file_name: "banner.png".to_string(),
        content_type: Some("image/png".to_string()),
        bytes: vec![0x89; size],
    }
}

/// Hand-built `multipart/form-data` body for handler tests.
#[derive(Default)]
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: Vec<u8>) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, name, file_name, content_type
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(&bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn into_request(mut self, req: test::TestRequest) -> test::TestRequest {
        self.body
            .extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        req.insert_header((
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        ))
        .set_payload(self.body)
    }
}
