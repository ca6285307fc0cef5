#![no_main]

use libfuzzer_sys::fuzz_target;
use shiguredo_uri::uri::{Uri, is_absolute_reference};

fuzz_target!(|data: &[u8]| {
    // UTF-8 文字列として解釈できる場合のみテスト
    if let Ok(s) = std::str::from_utf8(data) {
        // URI パース
        if let Ok(uri) = Uri::parse(s) {
            // パース成功したら各種操作を実行
            let _ = uri.scheme();
            let _ = uri.authority();
            let _ = uri.user_info();
            let _ = uri.host();
            let _ = uri.port();
            let _ = uri.path();
            let _ = uri.query();
            let _ = uri.fragment();
            assert_eq!(uri.is_absolute(), is_absolute_reference(s));

            // 表示した結果は再びパースでき、同じ表示になる
            let displayed = uri.to_string();
            if let Ok(reparsed) = Uri::parse(&displayed) {
                assert_eq!(reparsed.to_string(), displayed, "display is not stable");
            }

            let _ = uri.with_scheme("https").with_host("example.com").to_string();
            let _ = uri.with_query("").with_fragment("").to_string();
        }

        let _ = Uri::parse_lossy(s);
    }
});
