//! Shared test fixtures
#![allow(dead_code)]

use membership_server::db::members::NewMember;
use membership_server::db::{DbService, admins, districts};
use membership_server::{AppState, auth};
use tempfile::TempDir;

pub const TEST_SECRET: &str = "test-secret-at-least-32-bytes-long!!";

pub struct TestContext {
    pub state: AppState,
    // Held so the temp work dir outlives the test
    pub tmp: TempDir,
}

/// Fresh database + blob dirs, districts seeded, one admin account
pub async fn setup() -> TestContext {
    let tmp = tempfile::tempdir().expect("temp dir");
    let db_path = tmp.path().join("test.db");
    let db = DbService::new(db_path.to_str().expect("utf8 path"))
        .await
        .expect("open test db");

    districts::seed(&db.pool).await.expect("seed districts");

    let hash = auth::hash_password("correct-horse").expect("hash");
    admins::create(&db.pool, "admin123", &hash, "admin")
        .await
        .expect("seed admin");

    let upload_dir = tmp.path().join("uploads");
    let idcard_dir = tmp.path().join("idcards");
    std::fs::create_dir_all(&upload_dir).expect("uploads dir");
    std::fs::create_dir_all(&idcard_dir).expect("idcards dir");

    let state = AppState::with_pool(db.pool, TEST_SECRET, upload_dir, idcard_dir);
    TestContext { state, tmp }
}

/// A valid submission for the given mobile number
pub fn valid_member(mobile: &str) -> NewMember {
    NewMember {
        name: "Test Person".into(),
        age: 30,
        blood_group: "O+".into(),
        mobile: mobile.into(),
        state: "Tamil Nadu".into(),
        district: "Chennai".into(),
        address: "12 Test Street".into(),
        voter_id: "TN1234567".into(),
        national_id: "9999-8888-7777".into(),
        ..NewMember::default()
    }
}

/// A valid PNG of noise pixels, several megabytes once encoded.
/// Noise defeats PNG compression, so the encoded size tracks the raw size.
pub fn large_png() -> Vec<u8> {
    let mut seed: u32 = 0x2545_F491;
    let img = image::RgbImage::from_fn(1024, 1024, |_, _| {
        seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let b = seed.to_le_bytes();
        image::Rgb([b[0], b[1], b[2]])
    });
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .expect("encode png");
    buf
}

/// A small valid PNG for photo upload tests
pub fn tiny_png() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(8, 8, image::Rgb([20, 110, 50]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .expect("encode png");
    buf
}
