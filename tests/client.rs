mod common;

use hearth::client::{ApiClient, BookingForm, FormPhase, SiteState};
use hearth::types::{BookingStatus, NewPost};

use common::test_server::TestServer;

// The client is blocking; run it off the async test runtime.
async fn with_client<F, T>(base_url: String, token: Option<String>, f: F) -> T
where
    F: FnOnce(ApiClient) -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let api = ApiClient::new(&base_url, token).expect("build client");
        f(api)
    })
    .await
    .expect("client task")
}

#[tokio::test]
async fn test_state_reloads_wholesale_after_each_mutation() {
    let server = TestServer::start().await;
    let base_url = server.base_url.clone();
    let token = server.admin_token.clone();

    with_client(base_url, Some(token), |api| {
        let mut state = SiteState::new(api);
        state.reload().expect("initial load");

        assert_eq!(state.posts.len(), 3);
        assert_eq!(state.theme_color, "#88B04B");
        assert!(state.bookings.is_empty());

        let id = state
            .add_post(&NewPost {
                title: "상담 후기".to_string(),
                content: "따뜻한 상담이었습니다.".to_string(),
                category: Some("후기".to_string()),
                image_url: None,
            })
            .expect("add post");

        // The mutation triggered a full refetch; the new post is index 0.
        assert_eq!(state.posts.len(), 4);
        assert_eq!(state.posts[0].id, id);

        state.remove_post(id).expect("remove post");
        assert_eq!(state.posts.len(), 3);
    })
    .await;
}

#[tokio::test]
async fn test_theme_color_applies_before_reload() {
    let server = TestServer::start().await;
    let base_url = server.base_url.clone();
    let token = server.admin_token.clone();

    with_client(base_url, Some(token), |api| {
        let mut state = SiteState::new(api);
        state.reload().expect("initial load");

        let mut update = std::collections::BTreeMap::new();
        update.insert("primary_color".to_string(), "#2ECC71".to_string());
        state.save_settings(&update).expect("save settings");

        assert_eq!(state.theme_color, "#2ECC71");
        assert_eq!(state.settings.primary_color, "#2ECC71");
        // Untouched keys keep their seeded values.
        assert_eq!(state.settings.site_name, "고마움의 운명상담소");
    })
    .await;
}

#[tokio::test]
async fn test_booking_form_happy_path_and_admin_flow() {
    let server = TestServer::start().await;
    let base_url = server.base_url.clone();
    let token = server.admin_token.clone();

    with_client(base_url.clone(), None, |api| {
        let mut form = BookingForm::new();
        form.fields.name = "Lee".to_string();
        form.fields.phone = "010-1111-2222".to_string();
        form.fields.date = "2025-02-01".to_string();
        form.fields.time = "14:00".to_string();

        form.submit(&api).expect("submit booking");

        assert_eq!(form.phase, FormPhase::Success);
        assert!(form.fields.name.is_empty());

        form.dismiss();
        assert_eq!(form.phase, FormPhase::Editing);
    })
    .await;

    with_client(base_url, Some(token), |api| {
        let mut state = SiteState::new(api);
        state.reload().expect("load");

        assert_eq!(state.bookings.len(), 1);
        let id = state.bookings[0].id;
        assert_eq!(state.bookings[0].status, BookingStatus::Pending);

        state
            .set_booking_status(id, BookingStatus::Confirmed)
            .expect("confirm");
        assert_eq!(state.bookings[0].status, BookingStatus::Confirmed);

        state.remove_booking(id).expect("delete booking");
        assert!(state.bookings.is_empty());
    })
    .await;
}
