#![no_main]

use libfuzzer_sys::fuzz_target;
use shiguredo_uri::uri::{
    form_decode_lossy, percent_decode, percent_decode_bytes, percent_decode_lossy, percent_encode,
};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let encoded = percent_encode(s);
        if let Ok(decoded) = percent_decode(&encoded) {
            assert_eq!(decoded, s);
        }
        assert_eq!(percent_decode_lossy(&encoded), s);

        // 厳密なデコードが成功する場合は寛容なデコードも同じ結果
        if let Ok(decoded) = percent_decode(s) {
            assert_eq!(percent_decode_lossy(s), decoded);
        }

        let _ = percent_decode_bytes(s);
        let _ = form_decode_lossy(s);
    }
});
