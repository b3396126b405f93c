use std::cmp::Ordering;

use crate::domain::entities::{AnimeListEntry, WatchStatus};
use crate::domain::errors::ProxyError;
use crate::domain::ports::AnimeProvider;

// Cards shown in the media section.
pub const SHOWCASE_SIZE: usize = 6;

#[derive(Debug, PartialEq)]
pub struct AnimeCard {
    pub title: String,
    pub image: Option<String>,
    pub status: WatchStatus,
    pub score: u8,
    pub url: String,
}

// Picks what is being watched now, then the best-rated completed titles.
pub struct AnimeShowcaseUseCase<A> {
    pub anime: A,
}

impl<A> AnimeShowcaseUseCase<A>
where
    A: AnimeProvider,
{
    pub async fn execute(&self) -> Result<Vec<AnimeCard>, ProxyError> {
        let entries = self.anime.anime_list().await?;
        Ok(showcase(entries))
    }
}

fn showcase(entries: Vec<AnimeListEntry>) -> Vec<AnimeCard> {
    let mut cards: Vec<AnimeCard> = entries
        .into_iter()
        .filter_map(|entry| match entry.status {
            Some(status @ (WatchStatus::Watching | WatchStatus::Completed)) => Some(AnimeCard {
                title: entry.title,
                image: entry.image,
                status,
                score: entry.score,
                url: entry.url,
            }),
            _ => None,
        })
        .collect();

    // Stable sort keeps upstream order among equal scores.
    cards.sort_by(|a, b| match (a.status, b.status) {
        (WatchStatus::Watching, WatchStatus::Completed) => Ordering::Less,
        (WatchStatus::Completed, WatchStatus::Watching) => Ordering::Greater,
        _ => b.score.cmp(&a.score),
    });
    cards.truncate(SHOWCASE_SIZE);
    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::ScriptedAnime;

    fn listed(title: &str, status: Option<WatchStatus>, score: u8) -> AnimeListEntry {
        AnimeListEntry {
            title: title.to_string(),
            image: Some(format!("https://cdn.example/{title}.webp")),
            status,
            score,
            url: format!("https://myanimelist.example/anime/{title}"),
        }
    }

    #[tokio::test]
    async fn when_list_mixes_statuses_then_only_watching_and_completed_are_kept() {
        let anime = ScriptedAnime {
            list: Ok(vec![
                listed("Dropped", Some(WatchStatus::Dropped), 9),
                listed("Planned", Some(WatchStatus::PlanToWatch), 0),
                listed("Done", Some(WatchStatus::Completed), 7),
                listed("Unknown", None, 10),
                listed("Now", Some(WatchStatus::Watching), 5),
            ]),
            ..ScriptedAnime::new()
        };
        let use_case = AnimeShowcaseUseCase { anime };

        let cards = use_case.execute().await.expect("expected showcase to succeed");

        let titles: Vec<&str> = cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Now", "Done"]);
    }

    #[tokio::test]
    async fn when_sorting_then_watching_comes_first_then_score_descending() {
        let anime = ScriptedAnime {
            list: Ok(vec![
                listed("C7", Some(WatchStatus::Completed), 7),
                listed("W3", Some(WatchStatus::Watching), 3),
                listed("C10", Some(WatchStatus::Completed), 10),
                listed("W8", Some(WatchStatus::Watching), 8),
            ]),
            ..ScriptedAnime::new()
        };
        let use_case = AnimeShowcaseUseCase { anime };

        let cards = use_case.execute().await.expect("expected showcase to succeed");

        let titles: Vec<&str> = cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["W8", "W3", "C10", "C7"]);
    }

    #[tokio::test]
    async fn when_more_than_six_qualify_then_list_is_truncated() {
        let list = (0..10)
            .map(|i| listed(&format!("T{i}"), Some(WatchStatus::Completed), i))
            .collect();
        let anime = ScriptedAnime {
            list: Ok(list),
            ..ScriptedAnime::new()
        };
        let use_case = AnimeShowcaseUseCase { anime };

        let cards = use_case.execute().await.expect("expected showcase to succeed");

        assert_eq!(cards.len(), SHOWCASE_SIZE);
        assert_eq!(cards[0].title, "T9");
        assert_eq!(cards[5].title, "T4");
    }

    #[tokio::test]
    async fn when_upstream_fails_then_error_is_propagated() {
        let anime = ScriptedAnime {
            list: Err(ProxyError::Upstream {
                status: 503,
                message: "Failed to fetch data from Jikan API: Service Unavailable".to_string(),
                details: None,
            }),
            ..ScriptedAnime::new()
        };
        let use_case = AnimeShowcaseUseCase { anime };

        let result = use_case.execute().await;

        assert!(matches!(
            result,
            Err(ProxyError::Upstream { status: 503, .. })
        ));
    }
}
