//! Single-file JSON ledger adapter.
//!
//! The whole household lives in one JSON document (see
//! [`LedgerDocument`](super::ledger_document)). Every mutation is a
//! read-modify-write under one async mutex; the new document replaces the
//! old one through a temp file and rename so readers never see a partial
//! write. A missing file reads as an empty ledger.

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::ports::{
    HouseholdRepository, HouseholdRepositoryError, UserAccount, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    BillingMonth, LedgerDate, LedgerSnapshot, MealEntry, Member, MemberId, RecordId, RentCost,
    RentPayment, ShoppingItem, TraceId, UserId, Username,
};

use super::ledger_document::LedgerDocument;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Errors raised while opening a JSON ledger file.
#[derive(Debug, thiserror::Error)]
pub enum JsonStoreError {
    /// The path does not name a file.
    #[error("ledger path {path} must name a file")]
    InvalidPath {
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// The parent directory could not be created or opened.
    #[error("failed to open ledger directory {path}: {source}")]
    OpenDirectory {
        /// Directory path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The ledger file does not exist.
    #[error("ledger {path} does not exist")]
    Missing {
        /// Expected file path.
        path: Utf8PathBuf,
    },
    /// The ledger file exists but could not be inspected.
    #[error("failed to inspect ledger {path}: {source}")]
    Inspect {
        /// File path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

#[derive(Debug)]
enum StoreFailure {
    Io(String),
    Decode(String),
}

impl From<StoreFailure> for HouseholdRepositoryError {
    fn from(value: StoreFailure) -> Self {
        match value {
            StoreFailure::Io(message) => Self::query(message),
            StoreFailure::Decode(message) => Self::serialization(message),
        }
    }
}

impl From<StoreFailure> for UserPersistenceError {
    fn from(value: StoreFailure) -> Self {
        match value {
            StoreFailure::Io(message) | StoreFailure::Decode(message) => Self::query(message),
        }
    }
}

/// JSON file adapter implementing the household and user repositories.
///
/// # Examples
/// ```no_run
/// use messbook::outbound::json_store::JsonLedgerStore;
///
/// let store = JsonLedgerStore::open("data/household.json").expect("open ledger");
/// assert!(store.path().ends_with("household.json"));
/// ```
#[derive(Debug, Clone)]
pub struct JsonLedgerStore {
    dir: Arc<Dir>,
    file_name: String,
    path: Utf8PathBuf,
    lock: Arc<Mutex<()>>,
}

/// Split a ledger path into the owned path, its file name and parent directory.
fn split_ledger_path(
    path: &Utf8Path,
) -> Result<(Utf8PathBuf, String, Utf8PathBuf), JsonStoreError> {
    let path = path.to_path_buf();
    let Some(file_name) = path.file_name().map(str::to_owned) else {
        return Err(JsonStoreError::InvalidPath { path });
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent.to_path_buf(),
        _ => Utf8PathBuf::from("."),
    };
    Ok((path, file_name, parent))
}

impl JsonLedgerStore {
    /// Open (creating the parent directory if needed) the ledger at `path`.
    pub fn open(path: impl AsRef<Utf8Path>) -> Result<Self, JsonStoreError> {
        let (path, file_name, parent) = split_ledger_path(path.as_ref())?;
        let open_error = |source| JsonStoreError::OpenDirectory {
            path: parent.clone(),
            source,
        };
        Dir::create_ambient_dir_all(&parent, ambient_authority()).map_err(open_error)?;
        let dir = Dir::open_ambient_dir(&parent, ambient_authority()).map_err(open_error)?;
        Ok(Self::from_parts(dir, file_name, path))
    }

    /// Open a ledger file that must already exist; nothing is created.
    ///
    /// # Errors
    /// Returns [`JsonStoreError::Missing`] when the file or its directory is
    /// absent.
    pub fn open_existing(path: impl AsRef<Utf8Path>) -> Result<Self, JsonStoreError> {
        let (path, file_name, parent) = split_ledger_path(path.as_ref())?;
        let dir = match Dir::open_ambient_dir(&parent, ambient_authority()) {
            Ok(dir) => dir,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(JsonStoreError::Missing { path });
            }
            Err(source) => {
                return Err(JsonStoreError::OpenDirectory {
                    path: parent,
                    source,
                });
            }
        };
        match dir.metadata(&file_name) {
            Ok(meta) if meta.is_file() => Ok(Self::from_parts(dir, file_name, path)),
            Ok(_) => Err(JsonStoreError::InvalidPath { path }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(JsonStoreError::Missing { path })
            }
            Err(source) => Err(JsonStoreError::Inspect { path, source }),
        }
    }

    fn from_parts(dir: Dir, file_name: String, path: Utf8PathBuf) -> Self {
        Self {
            dir: Arc::new(dir),
            file_name,
            path,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Location of the ledger file.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    async fn read(&self) -> Result<LedgerDocument, StoreFailure> {
        let dir = Arc::clone(&self.dir);
        let file_name = self.file_name.clone();
        let contents = TraceId::spawn_blocking(move || match dir.read_to_string(&file_name) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        })
        .await
        .map_err(|err| StoreFailure::Io(format!("ledger read task failed: {err}")))?
        .map_err(|err| StoreFailure::Io(format!("failed to read {}: {err}", self.path)))?;

        match contents {
            None => Ok(LedgerDocument::default()),
            Some(contents) if contents.trim().is_empty() => Ok(LedgerDocument::default()),
            Some(contents) => serde_json::from_str(&contents)
                .map_err(|err| StoreFailure::Decode(format!("invalid ledger {}: {err}", self.path))),
        }
    }

    async fn write(&self, document: &LedgerDocument) -> Result<(), StoreFailure> {
        let contents = serde_json::to_string_pretty(document)
            .map_err(|err| StoreFailure::Decode(format!("failed to encode ledger: {err}")))?;
        let dir = Arc::clone(&self.dir);
        let file_name = self.file_name.clone();
        TraceId::spawn_blocking(move || write_atomic(&dir, &file_name, &contents))
            .await
            .map_err(|err| StoreFailure::Io(format!("ledger write task failed: {err}")))?
            .map_err(|err| StoreFailure::Io(format!("failed to write {}: {err}", self.path)))?;
        debug!(path = %self.path, "ledger written");
        Ok(())
    }

    async fn inspect<T>(&self, view: impl FnOnce(&LedgerDocument) -> T) -> Result<T, StoreFailure> {
        let _guard = self.lock.lock().await;
        let document = self.read().await?;
        Ok(view(&document))
    }

    async fn modify<T>(
        &self,
        change: impl FnOnce(&mut LedgerDocument) -> T,
    ) -> Result<T, StoreFailure> {
        let _guard = self.lock.lock().await;
        let mut document = self.read().await?;
        let outcome = change(&mut document);
        self.write(&document).await?;
        Ok(outcome)
    }
}

fn write_atomic(dir: &Dir, file_name: &str, contents: &str) -> io::Result<()> {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let tmp_name = format!(".{file_name}.tmp.{}.{counter}", std::process::id());

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let written = dir.open_with(&tmp_name, &options).and_then(|mut file| {
        file.write_all(contents.as_bytes())?;
        file.sync_all()
    });
    let renamed = written.and_then(|()| dir.rename(&tmp_name, dir, file_name));
    if renamed.is_err() {
        // Leftover temp files are harmless; the rename error is what matters.
        drop(dir.remove_file(&tmp_name));
    }
    renamed
}

#[async_trait]
impl HouseholdRepository for JsonLedgerStore {
    async fn load_ledger(&self) -> Result<LedgerSnapshot, HouseholdRepositoryError> {
        Ok(self.inspect(LedgerDocument::snapshot).await?)
    }

    async fn find_member(
        &self,
        member_id: &MemberId,
    ) -> Result<Option<Member>, HouseholdRepositoryError> {
        Ok(self.inspect(|doc| doc.find_member(member_id)).await?)
    }

    async fn save_member(&self, member: &Member) -> Result<(), HouseholdRepositoryError> {
        Ok(self.modify(|doc| doc.save_member(member)).await?)
    }

    async fn find_meal_entry(
        &self,
        entry_id: &RecordId,
    ) -> Result<Option<MealEntry>, HouseholdRepositoryError> {
        Ok(self.inspect(|doc| doc.find_meal_entry(entry_id)).await?)
    }

    async fn find_meal_entry_for_day(
        &self,
        member_id: &MemberId,
        date: &LedgerDate,
    ) -> Result<Option<MealEntry>, HouseholdRepositoryError> {
        Ok(self
            .inspect(|doc| doc.find_meal_entry_for_day(member_id, date))
            .await?)
    }

    async fn save_meal_entry(&self, entry: &MealEntry) -> Result<(), HouseholdRepositoryError> {
        Ok(self.modify(|doc| doc.save_meal_entry(entry)).await?)
    }

    async fn delete_meal_entry(
        &self,
        entry_id: &RecordId,
    ) -> Result<bool, HouseholdRepositoryError> {
        Ok(self.modify(|doc| doc.delete_meal_entry(entry_id)).await?)
    }

    async fn find_shopping_item(
        &self,
        item_id: &RecordId,
    ) -> Result<Option<ShoppingItem>, HouseholdRepositoryError> {
        Ok(self.inspect(|doc| doc.find_shopping_item(item_id)).await?)
    }

    async fn save_shopping_item(
        &self,
        item: &ShoppingItem,
    ) -> Result<(), HouseholdRepositoryError> {
        Ok(self.modify(|doc| doc.save_shopping_item(item)).await?)
    }

    async fn delete_shopping_item(
        &self,
        item_id: &RecordId,
    ) -> Result<bool, HouseholdRepositoryError> {
        Ok(self.modify(|doc| doc.delete_shopping_item(item_id)).await?)
    }

    async fn find_rent_cost(
        &self,
        month: &BillingMonth,
    ) -> Result<Option<RentCost>, HouseholdRepositoryError> {
        Ok(self.inspect(|doc| doc.find_rent_cost(month)).await?)
    }

    async fn save_rent_cost(&self, rent: &RentCost) -> Result<(), HouseholdRepositoryError> {
        Ok(self.modify(|doc| doc.save_rent_cost(rent)).await?)
    }

    async fn find_rent_payment(
        &self,
        member_id: &MemberId,
        month_key: &str,
    ) -> Result<Option<RentPayment>, HouseholdRepositoryError> {
        Ok(self
            .inspect(|doc| doc.find_rent_payment(member_id, month_key))
            .await?)
    }

    async fn save_rent_payment(
        &self,
        payment: &RentPayment,
    ) -> Result<(), HouseholdRepositoryError> {
        Ok(self.modify(|doc| doc.save_rent_payment(payment)).await?)
    }
}

#[async_trait]
impl UserRepository for JsonLedgerStore {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let inserted = self.modify(|doc| doc.insert_user(account)).await?;
        if inserted {
            Ok(())
        } else {
            Err(UserPersistenceError::duplicate_username(
                account.user.username().as_ref(),
            ))
        }
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        Ok(self
            .inspect(|doc| doc.find_user_by_username(username))
            .await?)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserPersistenceError> {
        Ok(self.inspect(|doc| doc.find_user_by_id(id)).await?)
    }
}
