use mtg_proxies::error::{ApiError, AppError, AppResult};
use mtg_proxies::{resolve, CardEntry, CardFace, Decklist, ImageResolver, ImageUris};
use std::sync::{Arc, Mutex};

/// 记录每次调用的假解析器，解析结果就是地址本身
#[derive(Default)]
struct CountingResolver {
    calls: Mutex<Vec<String>>,
    fail_on: Option<String>,
}

impl CountingResolver {
    fn failing_on(url: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on: Some(url.to_string()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ImageResolver for CountingResolver {
    type Image = Arc<str>;

    async fn get_image(&self, url: &str) -> AppResult<Arc<str>> {
        self.calls.lock().unwrap().push(url.to_string());
        if self.fail_on.as_deref() == Some(url) {
            return Err(ApiError::BadStatus {
                endpoint: url.to_string(),
                status: 404,
            }
            .into());
        }
        Ok(Arc::from(url))
    }
}

fn card(count: u32, faces: &[&str]) -> CardEntry {
    CardEntry::new(
        count,
        faces.join(" // "),
        faces
            .iter()
            .map(|url| CardFace::new(*url, ImageUris::png(*url)))
            .collect(),
    )
}

fn urls(sequences: &[Vec<Arc<str>>]) -> Vec<Vec<&str>> {
    sequences
        .iter()
        .map(|seq| seq.iter().map(|image| image.as_ref()).collect())
        .collect()
}

fn sample_decks() -> Vec<Decklist> {
    vec![
        Decklist::default(),
        Decklist::new(vec![card(4, &["bolt"])]),
        Decklist::new(vec![card(2, &["f1", "f2"]), card(1, &["f3"])]),
        Decklist::new(vec![
            card(1, &["a"]),
            card(3, &["b1", "b2", "b3"]),
            card(2, &["c1", "c2"]),
            card(1, &["a"]),
        ]),
    ]
}

fn faces_times_count(deck: &Decklist) -> usize {
    deck.cards
        .iter()
        .map(|c| c.count as usize * c.faces.len())
        .sum()
}

#[tokio::test]
async fn single_face_is_repeated_by_count() {
    let deck = Decklist::new(vec![card(2, &["f1"])]);
    let result = resolve(&deck, &CountingResolver::default(), false)
        .await
        .unwrap();
    assert_eq!(urls(&result), vec![vec!["f1", "f1"]]);
}

#[tokio::test]
async fn combined_mode_keeps_face_order() {
    let deck = Decklist::new(vec![card(1, &["f1", "f2"])]);
    let result = resolve(&deck, &CountingResolver::default(), false)
        .await
        .unwrap();
    assert_eq!(urls(&result), vec![vec!["f1", "f2"]]);
}

#[tokio::test]
async fn combined_mode_groups_each_face_before_next_card() {
    let deck = Decklist::new(vec![card(3, &["front", "back"]), card(1, &["next"])]);
    let result = resolve(&deck, &CountingResolver::default(), false)
        .await
        .unwrap();
    assert_eq!(
        urls(&result),
        vec![vec!["front", "front", "front", "back", "back", "back", "next"]]
    );
}

#[tokio::test]
async fn separate_mode_partitions_by_face_index() {
    let deck = Decklist::new(vec![card(2, &["f1", "f2"]), card(1, &["f3"])]);
    let result = resolve(&deck, &CountingResolver::default(), true)
        .await
        .unwrap();
    assert_eq!(urls(&result), vec![vec!["f1", "f1", "f3"], vec!["f2", "f2"]]);
}

#[tokio::test]
async fn separate_mode_does_not_pad_shorter_cards() {
    let deck = Decklist::new(vec![
        card(1, &["a"]),
        card(1, &["b1", "b2", "b3"]),
        card(2, &["c1", "c2"]),
    ]);
    let result = resolve(&deck, &CountingResolver::default(), true)
        .await
        .unwrap();
    assert_eq!(
        urls(&result),
        vec![
            vec!["a", "b1", "c1", "c1"],
            vec!["b2", "c2", "c2"],
            vec!["b3"],
        ]
    );
}

#[tokio::test]
async fn empty_decklist() {
    let deck = Decklist::default();
    let resolver = CountingResolver::default();

    let combined = resolve(&deck, &resolver, false).await.unwrap();
    assert_eq!(combined.len(), 1);
    assert!(combined[0].is_empty());

    let separate = resolve(&deck, &resolver, true).await.unwrap();
    assert!(separate.is_empty());
    assert!(resolver.calls().is_empty());
}

#[tokio::test]
async fn sequence_lengths_match_counts() {
    for deck in sample_decks() {
        let resolver = CountingResolver::default();

        let combined = resolve(&deck, &resolver, false).await.unwrap();
        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].len(), faces_times_count(&deck));

        let separate = resolve(&deck, &resolver, true).await.unwrap();
        assert_eq!(separate.len(), deck.max_faces());
        assert_eq!(
            separate.iter().map(Vec::len).sum::<usize>(),
            faces_times_count(&deck)
        );
        for (index, sequence) in separate.iter().enumerate() {
            let expected: usize = deck
                .cards
                .iter()
                .filter(|c| c.faces.len() > index)
                .map(|c| c.count as usize)
                .sum();
            assert_eq!(sequence.len(), expected);
        }
    }
}

#[tokio::test]
async fn earlier_cards_come_first() {
    let deck = Decklist::new(vec![card(2, &["x1", "x2"]), card(2, &["y1", "y2"])]);
    let result = resolve(&deck, &CountingResolver::default(), false)
        .await
        .unwrap();
    let flat = urls(&result).remove(0);
    let last_x = flat.iter().rposition(|u| u.starts_with('x')).unwrap();
    let first_y = flat.iter().position(|u| u.starts_with('y')).unwrap();
    assert!(last_x < first_y);
}

#[tokio::test]
async fn resolver_called_once_per_card_face() {
    let deck = Decklist::new(vec![card(4, &["f1", "f2"]), card(3, &["f3"])]);
    let resolver = CountingResolver::default();

    let result = resolve(&deck, &resolver, false).await.unwrap();

    assert_eq!(resolver.calls(), vec!["f1", "f2", "f3"]);
    // 同一个面的所有副本共享同一个解析结果
    let sequence = &result[0];
    assert!(sequence[..4].iter().all(|img| Arc::ptr_eq(img, &sequence[0])));
    assert!(sequence[4..8].iter().all(|img| Arc::ptr_eq(img, &sequence[4])));
}

#[tokio::test]
async fn identical_urls_on_different_cards_are_resolved_again() {
    let deck = Decklist::new(vec![card(1, &["same"]), card(1, &["same"])]);
    let resolver = CountingResolver::default();

    resolve(&deck, &resolver, true).await.unwrap();

    assert_eq!(resolver.calls(), vec!["same", "same"]);
}

#[tokio::test]
async fn resolution_failure_aborts_everything() {
    let deck = Decklist::new(vec![
        card(1, &["ok"]),
        card(2, &["broken"]),
        card(1, &["never"]),
    ]);

    for separate in [false, true] {
        let resolver = CountingResolver::failing_on("broken");
        let err = resolve(&deck, &resolver, separate).await.unwrap_err();

        assert!(matches!(err, AppError::Api(ApiError::BadStatus { .. })));
        assert_eq!(resolver.calls(), vec!["ok", "broken"]);
    }
}

#[tokio::test]
async fn resolving_twice_gives_same_sequences() {
    let resolver = CountingResolver::default();
    for deck in sample_decks() {
        for separate in [false, true] {
            let first = resolve(&deck, &resolver, separate).await.unwrap();
            let second = resolve(&deck, &resolver, separate).await.unwrap();
            assert_eq!(first, second);
        }
    }
}
