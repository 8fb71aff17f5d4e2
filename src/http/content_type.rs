//! Extension to content-type mapping.
//!
//! # Design Decisions
//! - Static, exhaustive table with a defined default arm
//! - Extensions are lowercased before lookup; store keys come from archive
//!   entries with arbitrary casing
//! - `.dll`, `.dat`, `.blat`, `.data` are framework runtime payloads and
//!   are deliberately served as raw bytes

/// Default content type for unknown or missing extensions.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Map a lowercased file extension to its served content type.
pub fn from_extension(extension: &str) -> &'static str {
    match extension {
        "html" => "text/html",
        "js" | "mjs" => "application/javascript",
        "json" => "application/json",
        "wasm" => "application/wasm",
        "tar" => "application/x-tar",
        "zip" => "application/zip",
        "png" => "image/png",
        "jpg" => "image/jpeg",
        "css" => "text/css",
        "txt" => "text/plain",
        "br" => "application/brotli",
        "gz" => "application/gzip",
        "dll" | "dat" | "blat" | "data" => OCTET_STREAM,
        _ => OCTET_STREAM,
    }
}

/// Content type for a stored key, derived from its final extension.
pub fn for_key(key: &str) -> &'static str {
    match key.rsplit('.').next() {
        Some(extension) => from_extension(&extension.to_ascii_lowercase()),
        None => OCTET_STREAM,
    }
}
