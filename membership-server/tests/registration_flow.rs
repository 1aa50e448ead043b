//! Service-level registration, numbering and card rendering tests

mod common;

use chrono::Datelike;
use membership_server::db::{counters, members};
use membership_server::error::AppError;
use membership_server::registration::{self, PhotoUpload};
use membership_server::{idcard, photos};

use common::{setup, tiny_png, valid_member};

#[tokio::test]
async fn first_registration_gets_sequence_one() {
    let ctx = setup().await;

    let outcome = registration::register_member(&ctx.state, valid_member("9000000001"), None)
        .await
        .unwrap();

    let year = chrono::Utc::now().year();
    assert_eq!(outcome.membership_no, format!("PBM-{year}-000001"));
    assert!(!outcome.id.is_empty());

    let second = registration::register_member(&ctx.state, valid_member("9000000002"), None)
        .await
        .unwrap();
    assert_eq!(second.membership_no, format!("PBM-{year}-000002"));
}

#[tokio::test]
async fn duplicate_mobile_conflicts_and_leaves_store_unchanged() {
    let ctx = setup().await;

    registration::register_member(&ctx.state, valid_member("9000000001"), None)
        .await
        .unwrap();

    let err = registration::register_member(&ctx.state, valid_member("9000000001"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    assert_eq!(members::count(&ctx.state.pool).await.unwrap(), 1);
    // The failed attempt must not have consumed a membership number
    assert_eq!(
        counters::current(&ctx.state.pool, counters::MEMBERSHIP)
            .await
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn invalid_mobile_rejected_before_any_write() {
    let ctx = setup().await;

    for bad in ["12345", "12345678901", "90000abc01", ""] {
        let err = registration::register_member(&ctx.state, valid_member(bad), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "mobile {bad:?}");
    }

    assert_eq!(members::count(&ctx.state.pool).await.unwrap(), 0);
    assert_eq!(
        counters::current(&ctx.state.pool, counters::MEMBERSHIP)
            .await
            .unwrap(),
        0
    );
}

#[tokio::test]
async fn unknown_district_is_rejected() {
    let ctx = setup().await;

    let mut data = valid_member("9000000001");
    data.district = "Atlantis".into();
    let err = registration::register_member(&ctx.state, data, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_registrations_mint_distinct_numbers() {
    let ctx = setup().await;

    let mut handles = Vec::new();
    for i in 0..12u64 {
        let state = ctx.state.clone();
        handles.push(tokio::spawn(async move {
            let mobile = format!("90000000{i:02}");
            registration::register_member(&state, valid_member(&mobile), None).await
        }));
    }

    let mut numbers = Vec::new();
    for handle in handles {
        let outcome = handle.await.unwrap().unwrap();
        numbers.push(outcome.membership_no);
    }

    let mut deduped = numbers.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), numbers.len(), "duplicate numbers: {numbers:?}");
    assert_eq!(members::count(&ctx.state.pool).await.unwrap(), 12);
}

#[tokio::test]
async fn photo_is_stored_keyed_by_mobile() {
    let ctx = setup().await;

    let photo = PhotoUpload {
        file_name: "selfie.png".into(),
        data: tiny_png(),
    };
    registration::register_member(&ctx.state, valid_member("9000000001"), Some(photo))
        .await
        .unwrap();

    let member = members::find_by_mobile(&ctx.state.pool, "9000000001")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(member.photo.as_deref(), Some("9000000001.jpg"));
    assert!(ctx.state.upload_dir.join("9000000001.jpg").exists());
}

#[tokio::test]
async fn invalid_photo_fails_whole_registration() {
    let ctx = setup().await;

    let photo = PhotoUpload {
        file_name: "selfie.png".into(),
        data: b"not an image".to_vec(),
    };
    let err = registration::register_member(&ctx.state, valid_member("9000000001"), Some(photo))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(members::count(&ctx.state.pool).await.unwrap(), 0);
}

#[tokio::test]
async fn card_renders_and_caches_for_registered_member() {
    let ctx = setup().await;

    registration::register_member(&ctx.state, valid_member("9000000001"), None)
        .await
        .unwrap();

    let bytes = idcard::get_or_render(&ctx.state, "9000000001").await.unwrap();
    assert!(bytes.starts_with(b"%PDF"));

    let cache_path = ctx.state.idcard_dir.join("9000000001.pdf");
    assert!(cache_path.exists());

    // Second fetch serves the cached bytes
    let again = idcard::get_or_render(&ctx.state, "9000000001").await.unwrap();
    assert_eq!(bytes, again);
}

#[tokio::test]
async fn card_for_unknown_mobile_is_not_found() {
    let ctx = setup().await;

    let err = idcard::get_or_render(&ctx.state, "9999999999")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn card_renders_with_stored_photo() {
    let ctx = setup().await;

    let photo = PhotoUpload {
        file_name: "selfie.png".into(),
        data: tiny_png(),
    };
    registration::register_member(&ctx.state, valid_member("9000000001"), Some(photo))
        .await
        .unwrap();

    let bytes = idcard::get_or_render(&ctx.state, "9000000001").await.unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn delete_removes_record_and_cached_card() {
    let ctx = setup().await;

    registration::register_member(&ctx.state, valid_member("9000000001"), None)
        .await
        .unwrap();
    idcard::get_or_render(&ctx.state, "9000000001").await.unwrap();
    let cache_path = ctx.state.idcard_dir.join("9000000001.pdf");
    assert!(cache_path.exists());

    assert!(members::delete_by_mobile(&ctx.state.pool, "9000000001")
        .await
        .unwrap());
    idcard::remove_cached_card(&ctx.state.idcard_dir, "9000000001");
    assert!(!cache_path.exists());

    // Second delete finds nothing
    assert!(!members::delete_by_mobile(&ctx.state.pool, "9000000001")
        .await
        .unwrap());
}

#[tokio::test]
async fn dashboard_projection_is_redacted() {
    let ctx = setup().await;

    let photo = PhotoUpload {
        file_name: "selfie.png".into(),
        data: tiny_png(),
    };
    registration::register_member(&ctx.state, valid_member("9000000001"), Some(photo))
        .await
        .unwrap();

    let summaries = members::list_summaries(&ctx.state.pool, 100, 0).await.unwrap();
    assert_eq!(summaries.len(), 1);

    let value = serde_json::to_value(&summaries[0]).unwrap();
    let keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
    for redacted in ["address", "voter_id", "national_id", "photo"] {
        assert!(!keys.contains(&redacted), "leaked field {redacted}");
    }
    for expected in ["id", "name", "mobile", "district", "gender", "age"] {
        assert!(keys.contains(&expected), "missing field {expected}");
    }
}

// Keep the helper honest: the stored photo loader is what the renderer
// leans on for best-effort embedding.
#[tokio::test]
async fn stored_photo_roundtrips_through_loader() {
    let ctx = setup().await;
    let name = photos::store_photo(&ctx.state.upload_dir, "9000000001", &tiny_png()).unwrap();
    assert!(photos::load_photo(&ctx.state.upload_dir, &name).is_some());
    assert!(photos::load_photo(&ctx.state.upload_dir, "missing.jpg").is_none());
}
