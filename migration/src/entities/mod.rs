pub mod entry;

pub use entry::Entity as EntryEntity;
