//! Photo reference resolution and managed storage for uploaded files.
//!
//! Persisted photo values come in three flavors: empty, a legacy inline
//! Base64 image inherited from old data, or a managed reference into the
//! uploads directory. Only managed references are rewritten at read time;
//! everything else passes through untouched.

use std::path::Path;

use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;

/// Path segment that marks a stored photo value as a managed reference.
pub const MANAGED_SEGMENT: &str = "uploads/";

/// Translate a stored photo value into a client-reachable reference.
///
/// Managed references become `{public_base_url}/{basename}` so the server-local
/// directory layout never leaks. Empty and legacy inline values are returned
/// unchanged, which also makes this idempotent on already-resolved URLs.
pub fn resolve_photo_url(stored_path: &str, public_base_url: &str) -> String {
    if stored_path.is_empty() || !stored_path.contains(MANAGED_SEGMENT) {
        return stored_path.to_string();
    }

    let basename = Path::new(stored_path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| stored_path.to_string());

    format!("{}/{}", public_base_url.trim_end_matches('/'), basename)
}

/// Rewrite the `photo` field of each employee object in place for a read
/// response. Non-object entries and missing fields are skipped.
pub fn resolve_employee_photos(employees: &mut [Value], public_base_url: &str) {
    for employee in employees.iter_mut() {
        let Some(fields) = employee.as_object_mut() else {
            continue;
        };
        if let Some(Value::String(photo)) = fields.get("photo") {
            let resolved = resolve_photo_url(photo, public_base_url);
            if resolved != *photo {
                fields.insert("photo".to_string(), Value::String(resolved));
            }
        }
    }
}

/// Generate a collision-resistant file name for an upload, preserving the
/// original extension. Uniqueness is best-effort: a millisecond timestamp plus
/// a random component.
pub fn generate_stored_filename(original_name: &str) -> String {
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default();

    format!(
        "photo-{}-{}{}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple(),
        ext
    )
}

/// Write an uploaded photo into managed storage and return the managed
/// reference to persist on the employee record.
pub async fn store_uploaded_file(
    original_name: &str,
    data: &[u8],
    upload_dir: &Path,
) -> Result<String, AppError> {
    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create upload dir: {}", e)))?;

    let filename = generate_stored_filename(original_name);
    let file_path = upload_dir.join(&filename);

    tokio::fs::write(&file_path, data)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to store upload: {}", e)))?;

    tracing::debug!("Stored uploaded photo at {:?}", file_path);

    Ok(format!("{}{}", MANAGED_SEGMENT, filename))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BASE: &str = "http://localhost:3000";

    #[test]
    fn test_resolve_empty_passthrough() {
        assert_eq!(resolve_photo_url("", BASE), "");
    }

    #[test]
    fn test_resolve_legacy_inline_passthrough() {
        let inline = "data:image/png;base64,iVBORw0KGgo=";
        assert_eq!(resolve_photo_url(inline, BASE), inline);
    }

    #[test]
    fn test_resolve_managed_reference() {
        assert_eq!(
            resolve_photo_url("uploads/photo-123-abc.png", BASE),
            "http://localhost:3000/photo-123-abc.png"
        );
    }

    #[test]
    fn test_resolve_strips_server_local_prefix() {
        assert_eq!(
            resolve_photo_url("/srv/app/uploads/photo-1.jpg", BASE),
            "http://localhost:3000/photo-1.jpg"
        );
    }

    #[test]
    fn test_resolve_idempotent_on_resolved_value() {
        let resolved = resolve_photo_url("uploads/photo-1.jpg", BASE);
        assert_eq!(resolve_photo_url(&resolved, BASE), resolved);
    }

    #[test]
    fn test_resolve_trailing_slash_in_base() {
        assert_eq!(
            resolve_photo_url("uploads/p.png", "http://host:3000/"),
            "http://host:3000/p.png"
        );
    }

    #[test]
    fn test_resolve_employee_photos_mixed() {
        let mut employees = vec![
            json!({"id": 1, "photo": "uploads/a.png"}),
            json!({"id": 2, "photo": ""}),
            json!({"id": 3}),
            json!("not-an-object"),
        ];
        resolve_employee_photos(&mut employees, BASE);
        assert_eq!(employees[0]["photo"], "http://localhost:3000/a.png");
        assert_eq!(employees[1]["photo"], "");
        assert!(employees[2].get("photo").is_none());
    }

    #[test]
    fn test_generated_filename_preserves_extension() {
        let name = generate_stored_filename("me.PNG");
        assert!(name.starts_with("photo-"));
        assert!(name.ends_with(".PNG"));

        let bare = generate_stored_filename("no-extension");
        assert!(!bare.contains('.'));
    }

    #[test]
    fn test_generated_filenames_are_unique() {
        let mut names: Vec<String> = (0..50)
            .map(|_| generate_stored_filename("face.jpg"))
            .collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 50);
    }

    #[tokio::test]
    async fn test_store_uploaded_file_writes_managed_reference() {
        let dir = tempfile::TempDir::new().unwrap();
        let upload_dir = dir.path().join("uploads");

        let reference = store_uploaded_file("face.png", b"fake-png", &upload_dir)
            .await
            .unwrap();

        assert!(reference.starts_with(MANAGED_SEGMENT));
        assert!(reference.ends_with(".png"));

        let stored = upload_dir.join(reference.trim_start_matches(MANAGED_SEGMENT));
        let bytes = tokio::fs::read(stored).await.unwrap();
        assert_eq!(bytes, b"fake-png");
    }

    #[tokio::test]
    async fn test_store_uploaded_file_distinct_references() {
        let dir = tempfile::TempDir::new().unwrap();
        let upload_dir = dir.path().to_path_buf();

        let a = store_uploaded_file("same.jpg", b"one", &upload_dir)
            .await
            .unwrap();
        let b = store_uploaded_file("same.jpg", b"two", &upload_dir)
            .await
            .unwrap();
        assert_ne!(a, b);
    }
}
