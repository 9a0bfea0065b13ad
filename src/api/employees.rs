//! Employee roster endpoints: full-state read, full-state replace, photo upload.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde_json::Value;

use crate::errors::AppError;
use crate::models::{OrgChartState, PhotoResponse, ReplaceStateRequest, SaveResponse, StateResponse};
use crate::photos;
use crate::AppState;

/// Multipart field name carrying the uploaded photo.
const PHOTO_FIELD: &str = "newPhoto";

/// GET /api/employees - Load the full org-chart state, seeding defaults on first run.
pub async fn get_employees(
    State(state): State<AppState>,
) -> Result<Json<StateResponse>, AppError> {
    let mut current = state.repo.get_or_seed_state().await?;

    photos::resolve_employee_photos(&mut current.employees, &state.config.public_base_url);

    Ok(Json(StateResponse {
        employees: current.employees,
        custom_training_topics: current.custom_training_topics,
        available_training_topics: current.available_training_topics,
    }))
}

/// POST /api/employees/update - Replace the full org-chart state.
pub async fn update_employees(
    State(state): State<AppState>,
    Json(request): Json<ReplaceStateRequest>,
) -> Result<Json<SaveResponse>, AppError> {
    let Some(Value::Array(employees)) = request.employees else {
        return Err(AppError::Validation("Invalid data structure.".to_string()));
    };

    let new_state = OrgChartState {
        employees,
        custom_training_topics: request.custom_training_topics,
        available_training_topics: request.available_training_topics,
        last_updated: String::new(),
    };

    state.repo.replace_state(&new_state).await?;

    Ok(Json(SaveResponse {
        message: "Data saved successfully.".to_string(),
    }))
}

/// POST /api/employees/{id}/upload-photo - Store a photo and attach it to one employee.
///
/// Accepts a multipart form with a single `newPhoto` file field. Returns the
/// resolved public URL for the stored photo.
pub async fn upload_photo(
    State(state): State<AppState>,
    Path(employee_id): Path<i64>,
    mut multipart: Multipart,
) -> Result<Json<PhotoResponse>, AppError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some(PHOTO_FIELD) {
            let filename = field.file_name().unwrap_or("photo").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            upload = Some((filename, data.to_vec()));
        }
        // ignore unknown fields
    }

    let (filename, data) = upload.ok_or_else(|| {
        AppError::BadRequest(format!("Missing required '{}' field", PHOTO_FIELD))
    })?;

    let stored_path =
        photos::store_uploaded_file(&filename, &data, &state.config.upload_dir).await?;

    state.repo.set_employee_photo(employee_id, &stored_path).await?;

    let photo_url = photos::resolve_photo_url(&stored_path, &state.config.public_base_url);

    Ok(Json(PhotoResponse { photo: photo_url }))
}
