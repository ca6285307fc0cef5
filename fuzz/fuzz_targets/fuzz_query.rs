#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use shiguredo_uri::{Parameters, QueryValue, UriQuery, UriRequest};

#[derive(Arbitrary, Debug)]
struct FuzzQuery<'a> {
    query: &'a str,
    name: &'a str,
    value: &'a str,
    remove: bool,
}

fuzz_target!(|input: FuzzQuery<'_>| {
    let query = UriQuery::new(input.query);
    assert_eq!(query.get(), input.query);

    // パース結果をシリアライズし直してもパニックしない
    let rebuilt = UriQuery::from_parameters(query.parameters().clone());
    let _ = UriQuery::new(rebuilt.get());

    let _ = query.add(input.name, input.value);
    let _ = query.delete(input.name);
    let _ = query.decode();
    let _ = query.encode();

    let change = if input.remove {
        QueryValue::Null
    } else {
        QueryValue::from(input.value)
    };
    let modified = query.modify(Parameters::from([(input.name, change)]));
    if input.remove {
        assert!(!modified.parameters().contains_key(input.name));
    }

    let request = UriRequest::new(input.query);
    let _ = request.get();
    let _ = request.with_query(query);
});
