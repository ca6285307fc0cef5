#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use shiguredo_uri::{BasePathResolver, Urls};

#[derive(Arbitrary, Debug)]
struct FuzzUrls<'a> {
    key: &'a str,
    url: &'a str,
    path: Option<&'a str>,
    script_name: &'a str,
}

fuzz_target!(|input: FuzzUrls<'_>| {
    let mut urls = Urls::new();
    urls.set(input.key, input.url);

    let built = urls.build(input.key, input.path);
    assert!(built.is_ok());

    let _ = urls.get_uri(input.key, None);
    if input.key != "missing" {
        assert!(urls.build("missing", input.path).is_err());
    }

    let _ = BasePathResolver::new([("SCRIPT_NAME", input.script_name)]).resolve();
});
