mod bundle;
mod library_loader;
mod supabase;

pub use bundle::load_sermon_bundle;
pub use library_loader::LibraryLoader;
pub use supabase::SupabaseDocumentSource;
