use crate::common::{TestApp, routes};

/// Smallest valid PNG header bytes; enough for upload tests since the
/// server checks extension-derived content type, not image decoding.
fn fake_png() -> Vec<u8> {
    let mut bytes = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(&[0u8; 64]);
    bytes
}

#[tokio::test]
async fn uploaded_image_is_served_publicly() {
    let app = TestApp::spawn().await;
    let token = app.create_admin("ada", "securepass").await;

    let res = app
        .upload_with_token(routes::ADMIN_MEDIA, "hero.png", fake_png(), "image/png", &token)
        .await;
    assert_eq!(res.status, 201, "upload failed: {}", res.text);
    assert_eq!(res.body["filename"], "hero.png");
    assert_eq!(res.body["content_type"], "image/png");
    let ref_id = res.body["id"].as_str().unwrap().to_string();

    let served = app
        .client
        .get(format!("http://{}{}", app.addr, routes::media(&ref_id)))
        .send()
        .await
        .expect("Failed to fetch media");
    assert_eq!(served.status().as_u16(), 200);
    assert_eq!(
        served.headers().get("content-type").unwrap(),
        "image/png"
    );
    assert!(served.headers().get("etag").is_some());
    let body = served.bytes().await.unwrap();
    assert_eq!(body.to_vec(), fake_png());
}

#[tokio::test]
async fn etag_match_returns_not_modified() {
    let app = TestApp::spawn().await;
    let token = app.create_admin("ada", "securepass").await;

    let res = app
        .upload_with_token(routes::ADMIN_MEDIA, "hero.png", fake_png(), "image/png", &token)
        .await;
    let ref_id = res.body["id"].as_str().unwrap().to_string();

    let url = format!("http://{}{}", app.addr, routes::media(&ref_id));
    let first = app.client.get(&url).send().await.unwrap();
    let etag = first.headers().get("etag").unwrap().to_str().unwrap().to_string();

    let second = app
        .client
        .get(&url)
        .header("If-None-Match", etag)
        .send()
        .await
        .unwrap();
    assert_eq!(second.status().as_u16(), 304);
}

#[tokio::test]
async fn non_image_uploads_are_rejected() {
    let app = TestApp::spawn().await;
    let token = app.create_admin("ada", "securepass").await;

    let res = app
        .upload_with_token(
            routes::ADMIN_MEDIA,
            "script.exe",
            b"MZ...".to_vec(),
            "application/octet-stream",
            &token,
        )
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn identical_uploads_share_content_but_get_distinct_refs() {
    let app = TestApp::spawn().await;
    let token = app.create_admin("ada", "securepass").await;

    let first = app
        .upload_with_token(routes::ADMIN_MEDIA, "a.png", fake_png(), "image/png", &token)
        .await;
    let second = app
        .upload_with_token(routes::ADMIN_MEDIA, "b.png", fake_png(), "image/png", &token)
        .await;

    assert_eq!(first.body["content_hash"], second.body["content_hash"]);
    assert_ne!(first.body["id"], second.body["id"]);

    let listing = app.get_with_token(routes::ADMIN_MEDIA, &token).await;
    assert_eq!(listing.body["total"], 2);
}

#[tokio::test]
async fn deleting_the_last_ref_removes_the_media() {
    let app = TestApp::spawn().await;
    let token = app.create_admin("ada", "securepass").await;

    let res = app
        .upload_with_token(routes::ADMIN_MEDIA, "hero.png", fake_png(), "image/png", &token)
        .await;
    let ref_id = res.body["id"].as_str().unwrap().to_string();

    let deleted = app.delete_with_token(&routes::admin_media(&ref_id), &token).await;
    assert_eq!(deleted.status, 204);

    let served = app
        .client
        .get(format!("http://{}{}", app.addr, routes::media(&ref_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(served.status().as_u16(), 404);
}

#[tokio::test]
async fn upload_requires_authentication() {
    let app = TestApp::spawn().await;

    let part = reqwest::multipart::Part::bytes(fake_png())
        .file_name("hero.png")
        .mime_str("image/png")
        .unwrap();
    let form = reqwest::multipart::Form::new().part("file", part);

    let res = app
        .client
        .post(format!("http://{}{}", app.addr, routes::ADMIN_MEDIA))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 401);
}
