/*!
 * Translation records built from extracted entries.
 *
 * - `item`: one lock-guarded record per entry
 * - `file`: the records of one script file, with JSON persistence
 * - `tokens`: memoized token estimates shared by all records
 */

pub mod file;
pub mod item;
pub mod tokens;

pub use self::file::CacheFile;
pub use self::item::{CacheItem, CacheItemData, ScriptExtra, TranslationStatus};
pub use self::tokens::{estimate_tokens, TokenCounter};
