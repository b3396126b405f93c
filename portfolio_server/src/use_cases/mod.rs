pub mod anime_profile;
pub mod anime_showcase;
pub mod create_entry;
pub mod delete_entry;
pub mod list_entries;
pub mod now_playing;
pub mod top_artists;

#[cfg(test)]
pub(crate) mod test_support;
