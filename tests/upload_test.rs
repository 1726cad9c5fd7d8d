mod common;

use mockito::Matcher;

use bizdesk::upload::{CloudinaryUploader, ImageFile, UploadError, Uploader, upload_data_url};
use common::PNG_DATA_URL;

#[tokio::test]
async fn test_cloudinary_returns_secure_url() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1_1/demo/image/upload")
        .match_body(Matcher::UrlEncoded("upload_preset".into(), "unsigned".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"secure_url": "https://res.cloudinary.com/demo/image/upload/v1/a.png"}"#)
        .create_async()
        .await;

    let uploader = CloudinaryUploader::with_api_base(&server.url(), "demo", "unsigned");
    let url = upload_data_url(&uploader, PNG_DATA_URL).await.unwrap();

    mock.assert_async().await;
    assert_eq!(url, "https://res.cloudinary.com/demo/image/upload/v1/a.png");
}

#[tokio::test]
async fn test_cloudinary_error_message() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1_1/demo/image/upload")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": {"message": "Upload preset not found"}}"#)
        .create_async()
        .await;

    let uploader = CloudinaryUploader::with_api_base(&server.url(), "demo", "missing");
    let file = ImageFile::from_data_url(PNG_DATA_URL).unwrap();
    match uploader.upload(&file).await {
        Err(UploadError::Rejected(msg)) => assert_eq!(msg, "Upload preset not found"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_unconfigured_uploader_makes_no_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let uploader = CloudinaryUploader::with_api_base(&server.url(), "demo", "");
    let err = upload_data_url(&uploader, PNG_DATA_URL).await.unwrap_err();

    mock.assert_async().await;
    assert!(matches!(err, UploadError::NotConfigured));
    assert_eq!(err.user_message(), "Photo uploads are not available right now");
}

#[tokio::test]
async fn test_rejected_file_never_reaches_cloudinary() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let uploader = CloudinaryUploader::with_api_base(&server.url(), "demo", "unsigned");
    let err = upload_data_url(&uploader, "data:image/gif;base64,R0lGODlhAQABAAAAACw=")
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert!(matches!(err, UploadError::UnsupportedType(_)));
}
