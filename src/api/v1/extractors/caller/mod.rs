/*!
 * Downstream-side identity extractor
 *
 * Responsibility:
 * - gateway が付けた X-User-* ヘッダを handler 向けの型 (Caller) に変換する
 * - トークンは見ない (検証は gateway の責務、下流はヘッダを信頼する)
 *
 * Public API:
 * - Caller
 * - CallerExtractor
 */

mod core;
mod types;

pub use core::CallerExtractor;
pub use types::Caller;
