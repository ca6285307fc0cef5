#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use shiguredo_uri::UriPath;

#[derive(Arbitrary, Debug)]
struct FuzzPath<'a> {
    path: &'a str,
    segment: &'a str,
    prefix: &'a str,
    index: u8,
}

fuzz_target!(|input: FuzzPath<'_>| {
    let path = UriPath::new(input.path);
    let index = usize::from(input.index);

    let _ = path.segment(index);
    let _ = path.prepend_segment(input.segment, index);
    let _ = path.append_segment(input.segment, index);
    let _ = path.delete_segment(index);
    let _ = path.sub(input.prefix);
    let _ = path.decode();

    // セグメントから組み立て直すと元に戻る
    assert_eq!(path.with_segments(path.segments()).get(), path.get());

    // 範囲外のインデックスは何もしない
    let out_of_range = path.segments().len() + 1;
    assert_eq!(path.delete_segment(out_of_range), path);
    assert_eq!(path.segment(0), None);

    // エンコードしてデコードすると元に戻る
    if !path.get().contains('%') {
        assert_eq!(path.encode().decode().get(), path.get());
    }
});
