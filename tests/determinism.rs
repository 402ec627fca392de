use codedup::{
    extract_fragments, run_comparison, simhash, winnow, Algorithm, CancelToken, CompareConfig,
    Document, FragmentConfig, Language, WinnowingConfig,
};

fn corpus() -> Vec<Document> {
    let bodies = [
        "public int Add(int a, int b)\n{\n    return a + b;\n}\n",
        "public int Add(int x, int y)\n{\n    return x + y;\n}\n",
        "public int Sum(int[] values)\n{\n    var total = 0;\n    foreach (var v in values) total += v;\n    return total;\n}\n",
        "public int Total(int[] values)\n{\n    var total = 0;\n    foreach (var v in values) total += v;\n    return total;\n}\n",
        "Console.WriteLine(\"hello world\");\n",
    ];
    bodies
        .iter()
        .enumerate()
        .map(|(i, body)| Document::new(format!("f{i}"), format!("f{i}.cs"), Language::new("C#"), *body))
        .collect()
}

#[test]
fn winnowing_fingerprints_are_stable_across_runs() {
    let cfg = WinnowingConfig::default();
    let text = "for (int i = 0; i < 10; i++) { Console.WriteLine(i); }";
    let first = winnow(text, &cfg).expect("winnow");
    for _ in 0..5 {
        assert_eq!(winnow(text, &cfg).expect("winnow"), first);
    }
}

#[test]
fn equivalent_formatting_yields_equal_signatures() {
    let a = "int  Max(int a,int b){return a>b?a:b;}";
    let b = "int max(int a, int b)\n{\n    return a > b ? a : b;\n}";
    let cfg = WinnowingConfig::default();
    assert_eq!(winnow(a, &cfg).expect("a"), winnow(b, &cfg).expect("b"));
    assert_eq!(simhash(a), simhash(b));
}

#[test]
fn comparison_reports_are_identical_across_runs() {
    let docs = corpus();
    for algorithm in [Algorithm::Winnowing, Algorithm::SimHash, Algorithm::ShingleCosine] {
        let cfg = CompareConfig::new(algorithm).with_threshold(0.4);
        let first = run_comparison(&docs, &cfg, &CancelToken::new()).expect("first run");
        for _ in 0..3 {
            let again = run_comparison(&docs, &cfg, &CancelToken::new()).expect("repeat run");
            assert_eq!(again, first, "{algorithm}");
        }
    }
}

#[test]
fn fragment_extraction_is_idempotent() {
    let docs = corpus();
    let cfg = FragmentConfig::default().with_min_lines(2);
    let first = extract_fragments(&docs, &cfg).expect("first");
    let second = extract_fragments(&docs, &cfg).expect("second");
    assert_eq!(first, second);
    assert!(first.total_fragments > 0);
}

#[test]
fn input_order_does_not_change_pair_scores() {
    let docs = corpus();
    let mut reversed = docs.clone();
    reversed.reverse();
    let cfg = CompareConfig::new(Algorithm::ShingleCosine).with_threshold(0.3);

    let forward = run_comparison(&docs, &cfg, &CancelToken::new()).expect("forward");
    let backward = run_comparison(&reversed, &cfg, &CancelToken::new()).expect("backward");

    let key = |a: &str, b: &str| if a < b { (a.to_string(), b.to_string()) } else { (b.to_string(), a.to_string()) };
    let mut f: Vec<_> = forward
        .report
        .pairs
        .iter()
        .map(|p| (key(&p.id_a, &p.id_b), p.similarity))
        .collect();
    let mut r: Vec<_> = backward
        .report
        .pairs
        .iter()
        .map(|p| (key(&p.id_a, &p.id_b), p.similarity))
        .collect();
    f.sort_by(|x, y| x.0.cmp(&y.0));
    r.sort_by(|x, y| x.0.cmp(&y.0));
    assert_eq!(f, r);
}
