//! Boot-time seeding: default settings, sample posts, and the one-shot
//! sample-content patches. Runs on every start; every step is idempotent.

use crate::error::Result;
use crate::types::{
    DEFAULT_HERO_TITLE, DEFAULT_PRIMARY_COLOR, DEFAULT_SITE_NAME, NewPost,
};

use super::Store;

const SAMPLE_POSTS: [(&str, &str, &str, &str); 3] = [
    (
        "2025년 병오년 당신의 운세는?",
        "붉은 말의 해를 맞아 각 띠별 운세와 개운법을 알려드립니다.",
        "운세정보",
        "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?auto=format&fit=crop&q=80&w=800",
    ),
    (
        "타로 카드로 보는 나의 심리 상태",
        "최근 스트레스가 많으신가요? 숲의 평온함을 닮은 타로를 통해 내면의 소리에 귀 기울여 보세요.",
        "타로이야기",
        "https://images.unsplash.com/photo-1448375240586-882707db888b?auto=format&fit=crop&q=80&w=800",
    ),
    (
        "사주명리학 개강 안내",
        "기초부터 탄탄하게 배우는 사주 명리학 8주 과정을 모집합니다. 자연의 섭리를 함께 공부해요.",
        "교육공지",
        "https://images.unsplash.com/photo-1511497584788-876760111969?auto=format&fit=crop&q=80&w=800",
    ),
];

/// Literal old-sample → current-sample rewrites. Applied unconditionally on
/// every boot; once a rewrite lands, the old title no longer matches.
const LEGACY_PATCHES: [(&str, Option<&str>, Option<&str>); 3] = [
    (
        "2024년 갑진년, 당신의 운세는?",
        Some("2025년 병오년 당신의 운세는?"),
        Some("붉은 말의 해를 맞아 각 띠별 운세와 개운법을 알려드립니다."),
    ),
    (
        "2025년 병오년 당신의 운세는?",
        None,
        Some("붉은 말의 해를 맞아 각 띠별 운세와 개운법을 알려드립니다."),
    ),
    (
        "사주 명리학 초급 과정 개강 안내",
        Some("사주명리학 개강 안내"),
        None,
    ),
];

/// Ensures default settings exist and the posts table has starter content.
/// Safe to run on every process start.
pub fn run(store: &dyn Store) -> Result<()> {
    store.seed_setting("primary_color", DEFAULT_PRIMARY_COLOR)?;
    store.seed_setting("site_name", DEFAULT_SITE_NAME)?;
    store.seed_setting("hero_title", DEFAULT_HERO_TITLE)?;

    if store.count_posts()? == 0 {
        for (title, content, category, image_url) in SAMPLE_POSTS {
            store.create_post(&NewPost {
                title: title.to_string(),
                content: content.to_string(),
                category: Some(category.to_string()),
                image_url: Some(image_url.to_string()),
            })?;
        }
        tracing::info!("Seeded {} sample posts", SAMPLE_POSTS.len());
    } else {
        for (old_title, new_title, new_content) in LEGACY_PATCHES {
            let touched = store.rewrite_post_by_title(old_title, new_title, new_content)?;
            if touched > 0 {
                tracing::info!("Rewrote {touched} legacy sample post(s) titled '{old_title}'");
            }
        }
    }

    Ok(())
}
