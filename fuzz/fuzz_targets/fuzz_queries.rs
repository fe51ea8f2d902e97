#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tagdb::TagStore;

#[derive(Debug, Arbitrary)]
enum Step {
    And(u8),
    Or(u8),
    AndNot(u8),
}

#[derive(Debug, Arbitrary)]
struct Input {
    records: Vec<Vec<u8>>,
    start: u8,
    steps: Vec<Step>,
}

fn combine(step: &Step, a: bool, b: bool) -> bool {
    match step {
        Step::And(_) => a && b,
        Step::Or(_) => a || b,
        Step::AndNot(_) => a && !b,
    }
}

// Check query results against a per-record model
fuzz_target!(|input: Input| {
    let tag = |t: u8| u32::from(t % 8);

    let store = TagStore::new();
    for (i, tags) in input.records.iter().enumerate() {
        let tags: Vec<u32> = tags.iter().map(|&t| tag(t)).collect();
        store.add(i, &tags);
    }

    let has = |rec: &Vec<u8>, t: u32| t == 0 || rec.iter().any(|&x| tag(x) == t);
    let known = |t: u32| input.records.iter().any(|r| has(r, t));

    let mut query = store.query_by_tag(tag(input.start));
    let mut all_known = known(tag(input.start));
    let mut expected: Vec<bool> = input.records.iter().map(|r| has(r, tag(input.start))).collect();

    for step in &input.steps {
        let t = match *step {
            Step::And(t) | Step::Or(t) | Step::AndNot(t) => tag(t),
        };
        query = match step {
            Step::And(_) => query.and(t),
            Step::Or(_) => query.or(t),
            Step::AndNot(_) => query.and_not(t),
        };
        all_known &= known(t);
        for (e, r) in expected.iter_mut().zip(&input.records) {
            *e = combine(step, *e, has(r, t));
        }
    }

    let got = query.get();
    if all_known {
        let want: Vec<usize> = (0..expected.len()).filter(|&i| expected[i]).collect();
        assert_eq!(got, Some(want));
    } else {
        assert_eq!(got, None);
    }
    store.release_result(query);
});
