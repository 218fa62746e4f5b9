//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use dropvault_core::events::{Notification, NotificationLevel};
use dropvault_entity::file::{FileEntity, format_file_size};
use dropvault_entity::folder::Folder;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// File display row
#[derive(Debug, Serialize, Tabled)]
pub struct FileRow {
    /// File ID
    pub id: String,
    /// Name
    pub name: String,
    /// Category
    #[tabled(rename = "type")]
    #[serde(rename = "type")]
    pub category: String,
    /// Icon the presentation layer shows
    pub icon: String,
    /// Human-readable size
    pub size: String,
    /// Containing folder
    pub folder: String,
    /// Current version number
    pub version: u32,
    /// Number of stored versions
    pub versions: usize,
}

impl From<&FileEntity> for FileRow {
    fn from(file: &FileEntity) -> Self {
        Self {
            id: file.id.to_string(),
            name: file.name.clone(),
            category: file.category.to_string(),
            icon: file.category.icon_name().to_string(),
            size: format_file_size(file.size),
            folder: file.folder_id.to_string(),
            version: file.current_version,
            versions: file.versions.len(),
        }
    }
}

/// Folder display row
#[derive(Debug, Serialize, Tabled)]
pub struct FolderRow {
    /// Folder ID
    pub id: String,
    /// Name
    pub name: String,
    /// Parent folder
    pub parent: String,
    /// Files directly inside
    pub files: u64,
}

impl From<&Folder> for FolderRow {
    fn from(folder: &Folder) -> Self {
        Self {
            id: folder.id.to_string(),
            name: folder.name.clone(),
            parent: folder
                .parent_id
                .as_ref()
                .map_or_else(|| "-".to_string(), ToString::to_string),
            files: folder.file_count,
        }
    }
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results found.");
            } else {
                let table = Table::new(items).to_string();
                println!("{}", table);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string());
            println!("{}", json);
        }
    }
}

/// Print a single item in the selected format
pub fn print_item<T: Serialize + std::fmt::Debug>(item: &T, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            println!("{:#?}", item);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(item).unwrap_or_else(|_| "{}".to_string());
            println!("{}", json);
        }
    }
}

/// Print workspace notifications as status lines (table output only)
pub fn print_notifications(notifications: &[Notification], format: OutputFormat) {
    if format == OutputFormat::Json {
        return;
    }
    for notification in notifications {
        match notification.level {
            NotificationLevel::Success => print_success(&notification.message),
            NotificationLevel::Error => print_error(&notification.message),
        }
    }
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {}", msg);
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {}", msg);
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {}", msg);
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{}:", key), value);
}
