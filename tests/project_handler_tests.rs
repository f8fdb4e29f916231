
use portfolio_admin::{
    entities::{flash::FlashKind, project::ProjectRequest},
    errors::AppError,
};
use serde_json::json;
use test_utils::*;

#[actix_rt::test]
async fn store_persists_project_with_technologies() {
    let (handler, repos) = test_handler();
    let ctx = admin_context();

    let response = handler.store(&ctx, valid_request("Portfolio Site")).await.unwrap();

    let id = response.id.expect("new id");
    assert_eq!(response.redirect_to, format!("/admin/projects/{id}"));
    assert_eq!(response.flash.kind, FlashKind::Success);
    assert_eq!(response.flash.message, "Project successfully inserted");

    let detail = handler.show(&ctx, id).await.unwrap();
    assert_eq!(detail.project.title, "Portfolio Site");
    assert!(detail.project.visibility);
    assert_eq!(detail.project.type_id, None);
    assert!(detail.project_type.is_none());

    let names: Vec<&str> = detail.technologies.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["React", "Angular"]);
    assert_eq!(repos.projects.attached(id), vec![1, 2]);
}

#[actix_rt::test]
async fn show_includes_type_when_set() {
    let (handler, _repos) = test_handler();
    let ctx = admin_context();

    let mut request = valid_request("Typed Project");
    request.type_id = Some(json!(2));
    let id = handler.store(&ctx, request).await.unwrap().id.unwrap();

    let detail = handler.show(&ctx, id).await.unwrap();
    assert_eq!(detail.project_type.map(|t| t.name), Some("Mobile".to_string()));
}

#[actix_rt::test]
async fn store_rejects_duplicate_active_title() {
    let (handler, repos) = test_handler();
    let ctx = admin_context();

    handler.store(&ctx, valid_request("Portfolio Site")).await.unwrap();
    let err = handler.store(&ctx, valid_request("Portfolio Site")).await.unwrap_err();

    assert_eq!(err.messages_for("title"), vec!["The title field must be unique."]);
    assert_eq!(repos.projects.row_count(), 1);
}

#[actix_rt::test]
async fn title_of_deleted_project_can_be_reused() {
    let (handler, repos) = test_handler();
    let ctx = admin_context();

    let first = handler.store(&ctx, valid_request("Recycled")).await.unwrap().id.unwrap();
    handler.destroy(&ctx, first).await.unwrap();

    let second = handler.store(&ctx, valid_request("Recycled")).await.unwrap().id.unwrap();

    assert_ne!(first, second);
    assert_eq!(repos.projects.row_count(), 2);
}

#[actix_rt::test]
async fn store_reports_every_missing_field_at_once() {
    let (handler, repos) = test_handler();

    let err = handler
        .store(&admin_context(), ProjectRequest::default())
        .await
        .unwrap_err();

    assert_eq!(err.messages_for("title"), vec!["The title field is mandatory."]);
    assert_eq!(err.messages_for("description"), vec!["The description field is mandatory."]);
    assert_eq!(err.messages_for("start_date"), vec!["The start date field is mandatory."]);
    assert_eq!(err.messages_for("category"), vec!["The category field is mandatory."]);
    assert_eq!(err.messages_for("role"), vec!["The role field is mandatory."]);
    assert_eq!(err.messages_for("visibility"), vec!["The visibility field is mandatory."]);
    assert_eq!(repos.projects.row_count(), 0);
}

#[actix_rt::test]
async fn blank_strings_count_as_missing() {
    let (handler, _repos) = test_handler();

    let mut request = valid_request("   ");
    request.role = Some("  ".into());

    let err = handler.store(&admin_context(), request).await.unwrap_err();

    assert_eq!(err.messages_for("title"), vec!["The title field is mandatory."]);
    assert_eq!(err.messages_for("role"), vec!["The role field is mandatory."]);
}

#[actix_rt::test]
async fn store_reports_format_violations() {
    let (handler, repos) = test_handler();

    let request = request_from(json!({
        "title": "x".repeat(51),
        "description": "desc",
        "cover_image": "not-a-url",
        "start_date": "2024-13-01",
        "end_date": "someday",
        "category": "web",
        "project_url": "ftp://example.com",
        "github_url": "github",
        "role": "dev",
        "visibility": "yes",
        "type_id": 99,
        "technologies": [1, 999]
    }));

    let err = handler.store(&admin_context(), request).await.unwrap_err();

    assert_eq!(err.messages_for("title"), vec!["The title field cannot exceed 50 characters."]);
    assert_eq!(err.messages_for("cover_image"), vec!["The cover image must be a valid URL."]);
    assert_eq!(err.messages_for("start_date"), vec!["The start date must be a valid date."]);
    assert_eq!(err.messages_for("end_date"), vec!["The end date must be a valid date."]);
    assert_eq!(err.messages_for("project_url"), vec!["The project URL must be a valid URL."]);
    assert_eq!(err.messages_for("github_url"), vec!["The GitHub URL must be a valid URL."]);
    assert_eq!(err.messages_for("visibility"), vec!["The visibility field must be true or false."]);
    assert_eq!(err.messages_for("type_id"), vec!["the indicated type does not exist"]);
    assert_eq!(err.messages_for("technologies"), vec!["one or more selected technologies are invalid"]);
    assert_eq!(repos.projects.row_count(), 0);
}

#[actix_rt::test]
async fn validation_details_are_sorted_by_field() {
    let (handler, _repos) = test_handler();

    let err = handler
        .store(&admin_context(), ProjectRequest::default())
        .await
        .unwrap_err();

    match err {
        AppError::ValidationError(details) => {
            let fields: Vec<&str> = details.iter().map(|d| d.field.as_str()).collect();
            let mut sorted = fields.clone();
            sorted.sort();
            assert_eq!(fields, sorted);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[actix_rt::test]
async fn store_accepts_form_style_visibility_and_timestamps() {
    let (handler, _repos) = test_handler();
    let ctx = admin_context();

    let request = request_from(json!({
        "title": "Form Post",
        "description": "desc",
        "start_date": "2024-03-05T09:00:00Z",
        "category": "web",
        "role": "dev",
        "visibility": "0"
    }));

    let id = handler.store(&ctx, request).await.unwrap().id.unwrap();
    let detail = handler.show(&ctx, id).await.unwrap();

    assert!(!detail.project.visibility);
    assert_eq!(detail.project.start_date.to_string(), "2024-03-05");
    assert!(detail.technologies.is_empty());
}

#[actix_rt::test]
async fn store_ignores_duplicate_technology_ids() {
    let (handler, repos) = test_handler();

    let mut request = valid_request("Dupes");
    request.technologies = Some(json!([3, 3, 1, 3]));

    let id = handler.store(&admin_context(), request).await.unwrap().id.unwrap();

    assert_eq!(repos.projects.attached(id), vec![1, 3]);
}

#[actix_rt::test]
async fn update_keeps_own_title_and_replaces_technologies() {
    let (handler, repos) = test_handler();
    let ctx = admin_context();

    let id = handler.store(&ctx, valid_request("Portfolio Site")).await.unwrap().id.unwrap();

    let mut request = valid_request("Portfolio Site");
    request.technologies = Some(json!([2, 3]));
    let response = handler.update(&ctx, id, request).await.unwrap();

    assert_eq!(response.id, Some(id));
    assert_eq!(response.redirect_to, format!("/admin/projects/{id}"));
    assert_eq!(response.flash.message, "Project successfully modified");
    assert_eq!(repos.projects.attached(id), vec![2, 3]);
}

#[actix_rt::test]
async fn update_with_same_technologies_is_idempotent() {
    let (handler, repos) = test_handler();
    let ctx = admin_context();

    let id = handler.store(&ctx, valid_request("Stable")).await.unwrap().id.unwrap();

    handler.update(&ctx, id, valid_request("Stable")).await.unwrap();
    handler.update(&ctx, id, valid_request("Stable")).await.unwrap();

    assert_eq!(repos.projects.attached(id), vec![1, 2]);
}

#[actix_rt::test]
async fn update_without_technologies_detaches_all() {
    let (handler, repos) = test_handler();
    let ctx = admin_context();

    let id = handler.store(&ctx, valid_request("Detach Me")).await.unwrap().id.unwrap();

    let mut request = valid_request("Detach Me");
    request.technologies = None;
    handler.update(&ctx, id, request).await.unwrap();

    assert!(repos.projects.attached(id).is_empty());
    let detail = handler.show(&ctx, id).await.unwrap();
    assert!(detail.technologies.is_empty());
}

#[actix_rt::test]
async fn update_rejects_title_of_another_project() {
    let (handler, repos) = test_handler();
    let ctx = admin_context();

    handler.store(&ctx, valid_request("First")).await.unwrap();
    let second = handler.store(&ctx, valid_request("Second")).await.unwrap().id.unwrap();

    let mut request = valid_request("First");
    request.technologies = Some(json!([5]));
    let err = handler.update(&ctx, second, request).await.unwrap_err();

    assert_eq!(err.messages_for("title"), vec!["The title field must be unique."]);
    assert_eq!(repos.projects.raw_project(second).unwrap().title, "Second");
    assert_eq!(repos.projects.attached(second), vec![1, 2]);
}

#[actix_rt::test]
async fn update_overwrites_absent_optional_fields() {
    let (handler, _repos) = test_handler();
    let ctx = admin_context();

    let mut request = valid_request("Full");
    request.client = Some("ACME".into());
    request.github_url = Some("https://github.com/acme/site".into());
    request.type_id = Some(json!(1));
    let id = handler.store(&ctx, request).await.unwrap().id.unwrap();

    handler.update(&ctx, id, valid_request("Full")).await.unwrap();

    let detail = handler.show(&ctx, id).await.unwrap();
    assert_eq!(detail.project.client, None);
    assert_eq!(detail.project.github_url, None);
    assert_eq!(detail.project.type_id, None);
}

#[actix_rt::test]
async fn update_of_unknown_or_deleted_project_is_not_found() {
    let (handler, _repos) = test_handler();
    let ctx = admin_context();

    let err = handler.update(&ctx, 42, valid_request("Ghost")).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let id = handler.store(&ctx, valid_request("Gone")).await.unwrap().id.unwrap();
    handler.destroy(&ctx, id).await.unwrap();

    let err = handler.update(&ctx, id, valid_request("Gone")).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[actix_rt::test]
async fn destroy_hides_project_until_restored() {
    let (handler, repos) = test_handler();
    let ctx = admin_context();

    let id = handler.store(&ctx, valid_request("Phoenix")).await.unwrap().id.unwrap();

    let deleted = handler.destroy(&ctx, id).await.unwrap();
    assert_eq!(deleted.id, None);
    assert_eq!(deleted.redirect_to, "/admin/projects");
    assert_eq!(deleted.flash.message, "Project successfully deleted");

    assert!(matches!(handler.show(&ctx, id).await, Err(AppError::NotFound(_))));
    assert!(handler.list(&ctx).await.unwrap().is_empty());
    assert!(repos.projects.raw_project(id).unwrap().deleted_at.is_some());
    assert_eq!(repos.projects.attached(id), vec![1, 2]);

    let restored = handler.restore(&ctx, id).await.unwrap();
    assert_eq!(restored.flash.message, "Project successfully restored");

    let detail = handler.show(&ctx, id).await.unwrap();
    assert_eq!(detail.project.title, "Phoenix");
    assert_eq!(detail.technologies.len(), 2);
}

#[actix_rt::test]
async fn destroy_twice_is_not_found() {
    let (handler, _repos) = test_handler();
    let ctx = admin_context();

    let id = handler.store(&ctx, valid_request("Once")).await.unwrap().id.unwrap();
    handler.destroy(&ctx, id).await.unwrap();

    match handler.destroy(&ctx, id).await {
        Err(AppError::NotFound(msg)) => assert_eq!(msg, "Project not found"),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[actix_rt::test]
async fn restore_rules() {
    let (handler, _repos) = test_handler();
    let ctx = admin_context();

    assert!(matches!(handler.restore(&ctx, 7).await, Err(AppError::NotFound(_))));

    let id = handler.store(&ctx, valid_request("Live")).await.unwrap().id.unwrap();
    assert!(matches!(handler.restore(&ctx, id).await, Err(AppError::Conflict(_))));

    handler.destroy(&ctx, id).await.unwrap();
    handler.store(&ctx, valid_request("Live")).await.unwrap();

    // an active project now owns the title
    assert!(matches!(handler.restore(&ctx, id).await, Err(AppError::Conflict(_))));
}

#[actix_rt::test]
async fn list_orders_by_most_recent_update() {
    let (handler, _repos) = test_handler();
    let ctx = admin_context();

    let a = handler.store(&ctx, valid_request("A")).await.unwrap().id.unwrap();
    let b = handler.store(&ctx, valid_request("B")).await.unwrap().id.unwrap();
    let c = handler.store(&ctx, valid_request("C")).await.unwrap().id.unwrap();

    handler.update(&ctx, a, valid_request("A")).await.unwrap();
    handler.destroy(&ctx, b).await.unwrap();

    let ids: Vec<i64> = handler.list(&ctx).await.unwrap().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![a, c]);
}

#[actix_rt::test]
async fn forms_expose_catalog_choices() {
    let (handler, _repos) = test_handler();
    let ctx = admin_context();

    let create = handler.create_form(&ctx).await.unwrap();
    assert_eq!(create.types.len(), 2);
    assert_eq!(create.technologies.len(), 15);
    assert!(create.project.title.is_none());

    let mut request = valid_request("Editable");
    request.technologies = Some(json!([4, 2]));
    let id = handler.store(&ctx, request).await.unwrap().id.unwrap();

    let edit = handler.edit_form(&ctx, id).await.unwrap();
    assert_eq!(edit.project.id, id);
    assert_eq!(edit.project_technology_ids, vec![2, 4]);
    assert_eq!(edit.technologies.len(), 15);

    assert!(matches!(handler.edit_form(&ctx, 999).await, Err(AppError::NotFound(_))));
}

#[actix_rt::test]
async fn short_text_fields_are_capped_at_column_width() {
    let (handler, repos) = test_handler();

    let mut request = valid_request("Wide Columns");
    request.category = Some("c".repeat(256));
    request.client = Some("k".repeat(256));
    request.role = Some("r".repeat(256));

    let err = handler.store(&admin_context(), request).await.unwrap_err();

    assert_eq!(err.messages_for("category"), vec!["The category field cannot exceed 255 characters."]);
    assert_eq!(err.messages_for("client"), vec!["The client field cannot exceed 255 characters."]);
    assert_eq!(err.messages_for("role"), vec!["The role field cannot exceed 255 characters."]);
    assert_eq!(repos.projects.row_count(), 0);

    let mut request = valid_request("Exactly Wide");
    request.role = Some("r".repeat(255));
    assert!(handler.store(&admin_context(), request).await.is_ok());
}

#[actix_rt::test]
async fn references_sent_as_text_are_accepted() {
    let (handler, repos) = test_handler();
    let ctx = admin_context();

    let request = request_from(json!({
        "title": "Form Encoded",
        "description": "desc",
        "start_date": "2024-01-01",
        "category": "web",
        "role": "dev",
        "visibility": "1",
        "type_id": "2",
        "technologies": ["3", 1, "3"]
    }));

    let id = handler.store(&ctx, request).await.unwrap().id.unwrap();

    assert_eq!(repos.projects.attached(id), vec![1, 3]);
    assert_eq!(repos.projects.raw_project(id).unwrap().type_id, Some(2));
}

#[actix_rt::test]
async fn malformed_references_join_the_other_violations() {
    let (handler, repos) = test_handler();

    let request = request_from(json!({
        "title": "",
        "description": "desc",
        "start_date": "2024-01-01",
        "category": "web",
        "role": "dev",
        "visibility": true,
        "type_id": "abc",
        "technologies": ["x"]
    }));

    let err = handler.store(&admin_context(), request).await.unwrap_err();

    assert_eq!(err.messages_for("title"), vec!["The title field is mandatory."]);
    assert_eq!(err.messages_for("type_id"), vec!["the indicated type does not exist"]);
    assert_eq!(err.messages_for("technologies"), vec!["one or more selected technologies are invalid"]);
    assert_eq!(repos.projects.row_count(), 0);
}
