pub mod file_lock;
pub mod ndjson_audit_log;
