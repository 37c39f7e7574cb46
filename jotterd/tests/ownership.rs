mod common;

use std::error::Error;
use common::{launch, PNG};
use rocket::http::Status;
use serde_json::json;

#[tokio::test]
async fn foreign_resources_look_missing() -> Result<(), Box<dyn Error>> {
    let app = launch("signed").await?;
    let alice = app.user("alice").await?;
    let bob = app.user("bob").await?;

    let notebook = app.default_notebook(&alice).await;
    let note = app.create_note(&alice, notebook, "alice's secret").await;
    let image = app.upload_image(&alice, note, "image/png", PNG).await;
    assert_eq!(image.status, Status::Created);
    let image = image.body["id"].as_i64().ok_or("no image id")?;

    let notebooks = app.get("/api/notebooks", Some(&bob)).await;
    assert!(
        notebooks.body.as_array()
            .ok_or("not a list")?
            .iter()
            .all(|n| n["id"] != json!(notebook))
    );

    for reply in [
        app.get(&format!("/api/notebooks/{notebook}/notes"), Some(&bob)).await,
        app.post(
            &format!("/api/notebooks/{notebook}/notes"),
            Some(&bob),
            json!({ "content": "planted" }),
        ).await,
        app.put(&format!("/api/notes/{note}"), Some(&bob), json!({ "content": "defaced" })).await,
        app.delete(&format!("/api/notes/{note}"), Some(&bob)).await,
        app.delete(&format!("/api/images/{image}"), Some(&bob)).await,
        app.get(&format!("/uploads/{image}"), Some(&bob)).await,
        app.delete(&format!("/api/notebooks/{notebook}"), Some(&bob)).await,
    ] {
        assert_eq!(reply.status, Status::NotFound);
        assert_eq!(reply.body["error"], "not found");
    }

    let notes = app.get(&format!("/api/notebooks/{notebook}/notes"), Some(&alice)).await;
    assert_eq!(notes.status, Status::Ok);
    assert_eq!(notes.body[0]["content"], "alice's secret");
    assert_eq!(notes.body[0]["images"][0]["id"], json!(image));
    assert_eq!(app.get(&format!("/uploads/{image}"), Some(&alice)).await.status, Status::Ok);
    Ok(())
}

#[tokio::test]
async fn foreign_upload_leaves_no_file() -> Result<(), Box<dyn Error>> {
    let app = launch("session").await?;
    let alice = app.user("alice").await?;
    let bob = app.user("bob").await?;
    let notebook = app.default_notebook(&alice).await;
    let note = app.create_note(&alice, notebook, "text").await;

    let upload = app.upload_image(&bob, note, "image/png", PNG).await;
    assert_eq!(upload.status, Status::NotFound);
    assert!(app.uploaded_files().is_empty());

    let upload = app.upload_image(&alice, 9999, "image/png", PNG).await;
    assert_eq!(upload.status, Status::NotFound);
    assert!(app.uploaded_files().is_empty());
    Ok(())
}

#[tokio::test]
async fn images_are_served_and_deleted() -> Result<(), Box<dyn Error>> {
    let app = launch("signed").await?;
    let alice = app.user("alice").await?;
    let notebook = app.default_notebook(&alice).await;
    let note = app.create_note(&alice, notebook, "with a picture").await;

    let upload = app.upload_image(&alice, note, "image/png", PNG).await;
    assert_eq!(upload.status, Status::Created);
    let id = upload.body["id"].as_i64().ok_or("no image id")?;
    let url = upload.body["url"].as_str().ok_or("no url")?.to_owned();
    assert_eq!(url, format!("/uploads/{id}"));
    assert_eq!(upload.body["note_id"], json!(note));
    assert_eq!(app.uploaded_files().len(), 1);
    assert!(app.uploaded_files()[0].ends_with(".png"));

    let served = app.client.get(url.clone()).cookie(alice.clone()).dispatch().await;
    assert_eq!(served.status(), Status::Ok);
    assert_eq!(served.into_bytes().await.as_deref(), Some(PNG));

    assert_eq!(app.delete(&format!("/api/images/{id}"), Some(&alice)).await.status, Status::Ok);
    assert!(app.uploaded_files().is_empty());
    assert_eq!(app.get(&url, Some(&alice)).await.status, Status::NotFound);
    assert_eq!(app.delete(&format!("/api/images/{id}"), Some(&alice)).await.status, Status::NotFound);
    Ok(())
}

#[tokio::test]
async fn unsupported_uploads_are_refused() -> Result<(), Box<dyn Error>> {
    let app = launch("signed").await?;
    let alice = app.user("alice").await?;
    let notebook = app.default_notebook(&alice).await;
    let note = app.create_note(&alice, notebook, "text").await;

    let upload = app.upload_image(&alice, note, "text/plain", b"hello").await;
    assert_eq!(upload.status, Status::BadRequest);
    assert!(app.uploaded_files().is_empty());

    let notes = app.get(&format!("/api/notebooks/{notebook}/notes"), Some(&alice)).await;
    assert_eq!(notes.body[0]["images"], json!([]));
    Ok(())
}

#[tokio::test]
async fn deleting_removes_image_files() -> Result<(), Box<dyn Error>> {
    let app = launch("signed").await?;
    let alice = app.user("alice").await?;

    let created = app.post("/api/notebooks", Some(&alice), json!({ "name": "Trips" })).await;
    assert_eq!(created.status, Status::Created);
    let trips = created.body["id"].as_i64().ok_or("no notebook id")?;
    let first = app.create_note(&alice, trips, "first").await;
    let second = app.create_note(&alice, trips, "second").await;
    for note in [first, first, second] {
        assert_eq!(app.upload_image(&alice, note, "image/png", PNG).await.status, Status::Created);
    }
    assert_eq!(app.uploaded_files().len(), 3);

    assert_eq!(app.delete(&format!("/api/notes/{first}"), Some(&alice)).await.status, Status::Ok);
    assert_eq!(app.uploaded_files().len(), 1);

    assert_eq!(app.delete(&format!("/api/notebooks/{trips}"), Some(&alice)).await.status, Status::Ok);
    assert!(app.uploaded_files().is_empty());
    assert_eq!(
        app.get(&format!("/api/notebooks/{trips}/notes"), Some(&alice)).await.status,
        Status::NotFound,
    );
    assert_eq!(
        app.put(&format!("/api/notes/{second}"), Some(&alice), json!({ "content": "x" })).await.status,
        Status::NotFound,
    );
    Ok(())
}

#[tokio::test]
async fn notes_are_listed_newest_first() -> Result<(), Box<dyn Error>> {
    let app = launch("signed").await?;
    let alice = app.user("alice").await?;
    let notebook = app.default_notebook(&alice).await;
    let older = app.create_note(&alice, notebook, "older").await;
    let newer = app.create_note(&alice, notebook, "newer").await;

    let notes = app.get(&format!("/api/notebooks/{notebook}/notes"), Some(&alice)).await;
    assert_eq!(notes.body[0]["id"], json!(newer));
    assert_eq!(notes.body[1]["id"], json!(older));

    let updated = app.put(&format!("/api/notes/{older}"), Some(&alice), json!({ "content": "edited" })).await;
    assert_eq!(updated.status, Status::Ok);
    let notes = app.get(&format!("/api/notebooks/{notebook}/notes"), Some(&alice)).await;
    assert_eq!(notes.body[1]["content"], "edited");

    let future = app.get(
        &format!("/api/notebooks/{notebook}/notes?from=32503680000"),
        Some(&alice),
    ).await;
    assert_eq!(future.status, Status::Ok);
    assert_eq!(future.body, json!([]));

    let all = app.get(
        &format!("/api/notebooks/{notebook}/notes?from=0&to=32503680000"),
        Some(&alice),
    ).await;
    assert_eq!(all.body.as_array().map(Vec::len), Some(2));
    Ok(())
}

#[tokio::test]
async fn notebook_validation() -> Result<(), Box<dyn Error>> {
    let app = launch("signed").await?;
    let alice = app.user("alice").await?;
    assert_eq!(
        app.post("/api/notebooks", Some(&alice), json!({ "name": "  " })).await.status,
        Status::BadRequest,
    );
    assert_eq!(
        app.post("/api/notebooks", Some(&alice), json!({})).await.status,
        Status::BadRequest,
    );
    assert_eq!(
        app.get("/api/notebooks/12345/notes", Some(&alice)).await.status,
        Status::NotFound,
    );
    Ok(())
}

#[tokio::test]
async fn malformed_ids_are_bad_requests() -> Result<(), Box<dyn Error>> {
    let app = launch("signed").await?;
    let alice = app.user("alice").await?;
    let notebook = app.default_notebook(&alice).await;

    for reply in [
        app.get("/api/notebooks/abc/notes", Some(&alice)).await,
        app.post("/api/notebooks/abc/notes", Some(&alice), json!({ "content": "x" })).await,
        app.delete("/api/notebooks/1.5", Some(&alice)).await,
        app.put("/api/notes/abc", Some(&alice), json!({ "content": "x" })).await,
        app.delete("/api/notes/abc", Some(&alice)).await,
        app.delete("/api/images/abc", Some(&alice)).await,
        app.get("/uploads/abc", Some(&alice)).await,
        app.get(&format!("/api/notebooks/{notebook}/notes?from=abc"), Some(&alice)).await,
        app.get(&format!("/api/notebooks/{notebook}/notes?to=1e3"), Some(&alice)).await,
        app.get(
            &format!("/api/notebooks/{notebook}/notes?from=99999999999999999"),
            Some(&alice),
        ).await,
    ] {
        assert_eq!(reply.status, Status::BadRequest, "{}", reply.body);
        assert!(reply.body["error"].as_str().is_some_and(|e| e.starts_with("invalid")));
    }

    Ok(())
}
