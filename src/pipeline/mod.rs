//! Pipeline stages for scanned-PDF → searchable-PDF conversion.
//!
//! Each submodule implements exactly one stage. Keeping stages separate
//! makes each independently testable and keeps the HTTP contract with the
//! analysis service in exactly three places.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ subset ──▶ submit ──▶ poll ──▶ fetch
//! (URL/path) (lopdf+b64) (202+job id) (200/202) (PDF bytes)
//! ```
//!
//! 1. [`input`]  — canonicalise the user-supplied path or URL to a local file
//! 2. [`subset`] — slice off the first N pages and base64-encode them; runs
//!    in `spawn_blocking` because lopdf is synchronous
//! 3. [`submit`] — POST the payload, extract the job handle from the
//!    `Operation-Location` header
//! 4. [`poll`]   — wait for the job's terminal state with a fixed delay and
//!    an optional wall-clock deadline
//! 5. [`fetch`]  — retrieve the rendered searchable PDF and persist it

pub mod fetch;
pub mod input;
pub mod poll;
pub mod submit;
pub mod subset;
