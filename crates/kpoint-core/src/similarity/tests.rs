use super::*;
use crate::config::DedupConfig;

fn kp(problem: &str, methods: &[&str]) -> KnowledgePoint {
    KnowledgePoint::new(problem, methods.iter().copied())
}

fn engine_with(policy: MatchPolicy, threshold: f64) -> SimilarityEngine {
    SimilarityEngine::new(DedupConfig {
        similar_threshold: threshold,
        policy,
        ..Default::default()
    })
}

#[test]
fn test_compare_identical_after_normalization() {
    let a = kp("How to learn English?", &["practice daily"]);
    let b = kp("how to learn english", &["practice daily"]);

    let result = compare(&a, &b);
    assert_eq!(result.relationship, Relationship::Identical);
    assert_eq!(result.score, 1.0);
}

#[test]
fn test_compare_identical_with_reordered_methods() {
    let a = kp("fix bug A", &["patch X", "restart service"]);
    let b = kp("Fix bug a", &["restart   service", "PATCH x"]);

    assert_eq!(compare(&a, &b).relationship, Relationship::Identical);
}

#[test]
fn test_compare_different_methods() {
    let a = kp("fix bug A", &["patch X"]);
    let b = kp("fix bug A", &["patch Y"]);

    let result = compare(&a, &b);
    assert_eq!(result.relationship, Relationship::DifferentMethods);
    assert_eq!(result.score, 0.9);
}

#[test]
fn test_compare_different_methods_score_is_configurable() {
    let engine = SimilarityEngine::new(DedupConfig {
        different_methods_score: 0.75,
        ..Default::default()
    });
    let result = engine.compare(&kp("p", &["a"]), &kp("p", &["b"]));
    assert_eq!(result.relationship, Relationship::DifferentMethods);
    assert_eq!(result.score, 0.75);
}

#[test]
fn test_compare_similar() {
    let a = kp("how to improve listening skills", &[]);
    let b = kp("how to improve listening ability", &[]);

    let result = compare(&a, &b);
    assert_eq!(result.relationship, Relationship::Similar);
    assert!(result.score > 0.7 && result.score < 1.0, "score {}", result.score);
}

#[test]
fn test_compare_different() {
    let a = kp("grammar tenses", &[]);
    let b = kp("vocabulary building", &[]);

    assert_eq!(compare(&a, &b), ComparisonResult::DIFFERENT);
}

#[test]
fn test_threshold_is_strict() {
    // "abcdefghij" vs "abcdefgxyz": distance 3 of 10 -> exactly 0.7
    let a = kp("abcdefghij", &[]);
    let b = kp("abcdefgxyz", &[]);

    assert_eq!(compare(&a, &b).relationship, Relationship::Different);

    let lenient = engine_with(MatchPolicy::FirstMatch, 0.69);
    assert_eq!(lenient.compare(&a, &b).relationship, Relationship::Similar);
}

#[test]
fn test_compare_missing_problems_and_methods() {
    let empty = KnowledgePoint::default();
    // Two empty records share the empty problem and the empty method list
    assert_eq!(compare(&empty, &empty).relationship, Relationship::Identical);

    let result = compare(&empty, &kp("how to read", &["skim"]));
    assert_eq!(result.relationship, Relationship::Different);
}

#[test]
fn test_compare_uses_title_fallback() {
    let titled: KnowledgePoint =
        serde_json::from_str(r#"{"title": "How to read faster?", "content": "skim"}"#).unwrap();
    let plain = kp("how to read faster", &["skim"]);

    assert_eq!(compare(&titled, &plain).relationship, Relationship::Identical);
}

#[test]
fn test_identical_problem_and_methods_never_downgraded() {
    let pairs = [
        ("Q?", vec!["a", "b"], "q", vec!["B", "a"]),
        ("  x  y ", vec![], "X Y", vec![]),
        ("如何提高听力？", vec!["每天听"], "如何提高听力", vec!["每天听"]),
    ];
    for (pa, ma, pb, mb) in pairs {
        let a = kp(pa, &ma);
        let b = kp(pb, &mb);
        assert_eq!(compare(&a, &b).relationship, Relationship::Identical);
        assert_eq!(compare(&b, &a).relationship, Relationship::Identical);
    }
}

#[test]
fn test_relationship_ordering() {
    assert!(Relationship::Identical > Relationship::DifferentMethods);
    assert!(Relationship::DifferentMethods > Relationship::Similar);
    assert!(Relationship::Similar > Relationship::Different);
}

#[test]
fn test_relationship_serializes_snake_case() {
    let json = serde_json::to_value(Relationship::DifferentMethods).unwrap();
    assert_eq!(json, "different_methods");
}

#[test]
fn test_deduplicate_empty_existing_all_new() {
    let a = kp("first candidate", &["m"]);
    let b = kp("second candidate", &[]);

    let result = deduplicate(&[a.clone(), b.clone()], &[]);
    assert_eq!(result.new, vec![a, b]);
    assert!(result.identical.is_empty());
    assert!(result.different_methods.is_empty());
    assert!(result.similar.is_empty());
}

#[test]
fn test_deduplicate_empty_candidates() {
    let result = deduplicate(&[], &[kp("x", &[])]);
    assert!(result.is_empty());
}

#[test]
fn test_deduplicate_partition_totality() {
    let existing = vec![
        kp("how to learn english", &["practice daily"]),
        kp("fix bug a", &["patch x"]),
        kp("how to improve listening skills", &["podcasts"]),
    ];
    let candidates = vec![
        kp("How to learn English?", &["practice daily"]),
        kp("fix bug A", &["patch y"]),
        kp("how to improve listening ability", &[]),
        kp("grammar tenses", &[]),
        kp("", &[]),
        kp("fix bug a", &["patch x"]),
    ];

    let result = deduplicate(&candidates, &existing);
    let summary = result.summary();

    assert_eq!(summary.total(), candidates.len());
    assert_eq!(summary.identical, 2);
    assert_eq!(summary.different_methods, 1);
    assert_eq!(summary.similar, 1);
    assert_eq!(summary.new, 2);

    // Each candidate appears exactly once across the buckets
    for candidate in &candidates {
        let count = result.identical.iter().filter(|m| &m.new == candidate).count()
            + result
                .different_methods
                .iter()
                .filter(|m| &m.new == candidate)
                .count()
            + result.similar.iter().filter(|m| &m.new == candidate).count()
            + result.new.iter().filter(|c| *c == candidate).count();
        assert_eq!(count, 1, "candidate {:?}", candidate.problem);
    }
}

#[test]
fn test_deduplicate_preserves_candidate_order_within_bucket() {
    let candidates = vec![kp("zeta", &[]), kp("alpha", &[]), kp("mu", &[])];
    let result = deduplicate(&candidates, &[kp("completely unrelated", &[])]);
    assert_eq!(result.new, candidates);
}

#[test]
fn test_first_match_stops_at_earlier_weaker_match() {
    // The similar item comes first, so first-match never reaches the identical one
    let existing = vec![
        kp("how to improve listening ability", &[]),
        kp("how to improve listening skills", &["podcasts"]),
    ];
    let candidate = kp("how to improve listening skills", &["podcasts"]);

    let result = deduplicate(std::slice::from_ref(&candidate), &existing);
    assert_eq!(result.similar.len(), 1);
    assert_eq!(result.similar[0].existing_index, 0);
    assert!(result.identical.is_empty());
}

#[test]
fn test_best_match_prefers_most_specific_relationship() {
    let existing = vec![
        kp("how to improve listening ability", &[]),
        kp("how to improve listening skills", &["shadowing"]),
        kp("how to improve listening skills", &["podcasts"]),
    ];
    let candidate = kp("how to improve listening skills", &["podcasts"]);

    let engine = engine_with(MatchPolicy::BestMatch, 0.7);
    let result = engine.deduplicate(std::slice::from_ref(&candidate), &existing);
    assert_eq!(result.identical.len(), 1);
    assert_eq!(result.identical[0].existing_index, 2);
}

#[test]
fn test_best_match_prefers_higher_similarity() {
    let existing = vec![
        kp("how to improve your reading", &[]),
        kp("how to improve reading", &[]),
    ];
    let candidate = kp("how to improve reading!", &[]);

    let engine = engine_with(MatchPolicy::BestMatch, 0.7);
    let result = engine.deduplicate(std::slice::from_ref(&candidate), &existing);
    assert_eq!(result.similar.len(), 1);
    assert_eq!(result.similar[0].existing_index, 1);

    let first = deduplicate(std::slice::from_ref(&candidate), &existing);
    assert_eq!(first.similar[0].existing_index, 0);
}

#[test]
fn test_best_match_ties_keep_earliest() {
    let existing = vec![kp("fix bug a", &["x"]), kp("fix bug a", &["y"])];
    let candidate = kp("fix bug a", &["z"]);

    let engine = engine_with(MatchPolicy::BestMatch, 0.7);
    let result = engine.deduplicate(std::slice::from_ref(&candidate), &existing);
    assert_eq!(result.different_methods[0].existing_index, 0);
}

#[test]
fn test_match_policy_from_str() {
    assert_eq!(
        "best-match".parse::<MatchPolicy>().unwrap(),
        MatchPolicy::BestMatch
    );
    assert_eq!(
        "FIRST-MATCH".parse::<MatchPolicy>().unwrap(),
        MatchPolicy::FirstMatch
    );
    assert!("nearest".parse::<MatchPolicy>().is_err());
}

#[test]
fn test_engine_is_shareable_across_threads() {
    let engine = SimilarityEngine::default();
    let existing = vec![kp("fix bug a", &["patch x"])];
    let batches = [
        vec![kp("fix bug a", &["patch x"])],
        vec![kp("something else", &[])],
    ];

    let engine = &engine;
    let existing = &existing;
    std::thread::scope(|scope| {
        let handles: Vec<_> = batches
            .iter()
            .map(|batch| scope.spawn(move || engine.deduplicate(batch, existing)))
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results[0].identical.len(), 1);
        assert_eq!(results[1].new.len(), 1);
    });
}
