use super::*;

fn anchor(href: &str) -> AnchorCandidate {
    AnchorCandidate::new(Some(href), "")
}

fn holo_query() -> CardQuery {
    CardQuery::builder("charizard", "4").holo(true).build()
}

#[test]
fn policy_for_plain_query_is_generic_fallbacks_only() {
    let q = CardQuery::builder("pikachu", "58").build();
    assert_eq!(
        SearchToken::policy(&q),
        vec![SearchToken::SlugAndId, SearchToken::SlugOnly]
    );
}

#[test]
fn policy_orders_every_guarded_token() {
    let q = CardQuery::builder("charizard", "4")
        .variant_type(Some("shadowless"))
        .holo(true)
        .first_edition(true)
        .reverse_holo(true)
        .build();
    assert_eq!(
        SearchToken::policy(&q),
        vec![
            SearchToken::Explicit {
                variant_type: "shadowless".into()
            },
            SearchToken::Holo,
            SearchToken::Foil,
            SearchToken::FirstEdition,
            SearchToken::ReverseHolo,
            SearchToken::SlugAndId,
            SearchToken::SlugOnly,
        ]
    );
}

#[test]
fn render_builds_expected_fragments() {
    assert_eq!(SearchToken::Holo.render("charizard", "4"), "charizard-holo-4");
    assert_eq!(SearchToken::Foil.render("charizard", "4"), "charizard-foil");
    assert_eq!(
        SearchToken::FirstEdition.render("charizard", "4"),
        "charizard-1st-edition-4"
    );
    assert_eq!(
        SearchToken::ReverseHolo.render("charizard", "4"),
        "charizard-reverse-holo-4"
    );
    assert_eq!(
        SearchToken::Explicit {
            variant_type: "Cosmos Holo".into()
        }
        .render("dark-charizard", "4"),
        "dark-charizard-cosmos-holo-4"
    );
}

#[test]
fn holo_token_wins_over_generic_fallback() {
    let anchors = vec![
        anchor("https://www.pricecharting.com/game/pokemon-base-set/charizard-4"),
        anchor("https://www.pricecharting.com/game/pokemon-base-set/charizard-holo-4"),
    ];
    let hit = match_link(&holo_query(), &anchors).expect("should match");
    assert_eq!(
        hit.href,
        "https://www.pricecharting.com/game/pokemon-base-set/charizard-holo-4"
    );
    assert_eq!(hit.token, SearchToken::Holo);
}

#[test]
fn falls_back_to_slug_and_id() {
    let anchors = vec![anchor(
        "https://www.pricecharting.com/game/pokemon-base-set/charizard-4",
    )];
    let hit = match_link(&holo_query(), &anchors).expect("should match");
    assert_eq!(
        hit.href,
        "https://www.pricecharting.com/game/pokemon-base-set/charizard-4"
    );
    assert_eq!(hit.token, SearchToken::SlugAndId);
}

#[test]
fn earlier_token_wins_even_when_later_anchor_order_differs() {
    let q = CardQuery::builder("charizard", "4")
        .holo(true)
        .reverse_holo(true)
        .build();
    let anchors = vec![
        anchor("/game/base/charizard-reverse-holo-4"),
        anchor("/game/base/charizard-foil-promo"),
    ];
    let hit = match_link(&q, &anchors).expect("should match");
    assert_eq!(hit.href, "/game/base/charizard-foil-promo");
    assert_eq!(hit.token, SearchToken::Foil);
}

#[test]
fn first_anchor_in_page_order_wins_for_same_token() {
    let anchors = vec![
        anchor("/game/base/charizard-4"),
        anchor("/game/base-2/charizard-4"),
    ];
    let q = CardQuery::builder("charizard", "4").build();
    assert_eq!(match_link(&q, &anchors).unwrap().href, "/game/base/charizard-4");
}

#[test]
fn matching_is_case_insensitive() {
    let anchors = vec![anchor("/game/base/Charizard-Holo-4")];
    let hit = match_link(&holo_query(), &anchors).expect("should match");
    assert_eq!(hit.token, SearchToken::Holo);
}

#[test]
fn only_final_segment_is_considered() {
    let anchors = vec![anchor("/game/charizard-holo-4/other-card")];
    assert!(match_link(&holo_query(), &anchors).is_none());
}

#[test]
fn slug_only_is_last_resort() {
    let anchors = vec![anchor("/game/base/charizard-promo")];
    let hit = match_link(&holo_query(), &anchors).expect("should match");
    assert_eq!(hit.token, SearchToken::SlugOnly);
}

#[test]
fn anchors_without_href_are_skipped() {
    let anchors = vec![AnchorCandidate::new(None, "charizard-4")];
    let q = CardQuery::builder("charizard", "4").build();
    assert!(match_link(&q, &anchors).is_none());
}

#[test]
fn empty_page_yields_none() {
    assert!(match_link(&holo_query(), &[]).is_none());
}

#[test]
fn no_token_matches_yields_none() {
    let anchors = vec![anchor("/game/base/blastoise-2"), anchor("/about")];
    assert!(match_link(&holo_query(), &anchors).is_none());
}

#[test]
fn multi_word_names_use_hyphenated_slug() {
    let q = CardQuery::builder("Dark Charizard", "4").build();
    let anchors = vec![anchor("/game/team-rocket/dark-charizard-4")];
    assert_eq!(
        match_link(&q, &anchors).unwrap().href,
        "/game/team-rocket/dark-charizard-4"
    );
}
