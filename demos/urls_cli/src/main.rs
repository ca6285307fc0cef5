//! 名前付き URL レジストリから URL を組み立てる例
//!
//! 使い方:
//!   cargo run -p urls_cli -- --set home=https://example.com home /about
//!   cargo run -p urls_cli -- --config urls.json backend /users/
//!   cargo run -p urls_cli -- --script-name /app/index.php base assets/app.js
//!
//! 設定ファイルはキーとベース URL の JSON オブジェクト:
//!   { "home": "https://example.com", "backend": "https://example.com/backend/" }

use shiguredo_uri::{BasePathResolver, Urls};

/// `--script-name` から登録するキー
const BASE_KEY: &str = "base";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = noargs::raw_args();
    args.metadata_mut().app_name = "urls_cli";

    // --help フラグ
    noargs::HELP_FLAG.take_help(&mut args);

    // --version フラグ
    let version_flag: bool = noargs::flag("version")
        .short('V')
        .doc("Show version")
        .take(&mut args)
        .is_present();
    if version_flag {
        println!("{}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    // --debug フラグ
    let debug: bool = noargs::flag("debug")
        .doc("Enable debug logging")
        .take(&mut args)
        .is_present();

    // --list フラグ
    let list: bool = noargs::flag("list")
        .short('l')
        .doc("List registered urls instead of building one")
        .take(&mut args)
        .is_present();

    // --config オプション
    let config_path: Option<String> = noargs::opt("config")
        .short('c')
        .doc("JSON file mapping keys to base urls")
        .take(&mut args)
        .present_and_then(|o| Ok::<_, &str>(o.value().to_string()))
        .map_err(|e| format!("{:?}", e))?;

    // --script-name オプション
    let script_name: Option<String> = noargs::opt("script-name")
        .doc("SCRIPT_NAME used to resolve the \"base\" url (e.g., /app/index.php)")
        .take(&mut args)
        .present_and_then(|o| Ok::<_, &str>(o.value().to_string()))
        .map_err(|e| format!("{:?}", e))?;

    // --set オプション (複数指定可)
    let mut entries = Vec::new();
    while let Some(entry) = noargs::opt("set")
        .short('s')
        .doc("Register a url as KEY=URL (repeatable)")
        .take(&mut args)
        .present_and_then(|o| parse_entry(o.value()))
        .map_err(|e| format!("{:?}", e))?
    {
        entries.push(entry);
    }

    // 位置引数: KEY
    let key: Option<String> = noargs::arg("[KEY]")
        .doc("Registered key to build from")
        .take(&mut args)
        .present_and_then(|a| Ok::<_, &str>(a.value().to_string()))
        .map_err(|e| format!("{:?}", e))?;

    // 位置引数: PATH
    let path: Option<String> = noargs::arg("[PATH]")
        .doc("Path appended to the base url")
        .take(&mut args)
        .present_and_then(|a| Ok::<_, &str>(a.value().to_string()))
        .map_err(|e| format!("{:?}", e))?;

    // 未知の引数があればエラー、ヘルプが返されたら表示
    if let Some(help) = args.finish().map_err(|e| format!("{:?}", e))? {
        print!("{}", help);
        return Ok(());
    }

    let mut urls = Urls::new();

    if let Some(config_path) = &config_path {
        log_debug(debug, &format!("load config: {}", config_path));
        let text = std::fs::read_to_string(config_path)?;
        let config = parse_config(&text)?;
        for (key, url) in &config.urls {
            log_debug(debug, &format!("config url: {} => {}", key, url));
            urls.set(key, url);
        }
    }

    if let Some(script_name) = &script_name {
        let base = BasePathResolver::new([("SCRIPT_NAME", script_name.as_str())]).resolve();
        log_debug(debug, &format!("resolved base path: {:?}", base));
        urls.set(BASE_KEY, &base);
    }

    for (key, url) in &entries {
        log_debug(debug, &format!("command line url: {} => {}", key, url));
        urls.set(key, url);
    }

    if list {
        for (key, url) in urls.all() {
            println!("{}\t{}", key, url);
        }
        return Ok(());
    }

    let key = key.ok_or("KEY is required (see --help)")?;
    let url = urls.build(&key, path.as_deref())?;
    log_debug(debug, &format!("built url: {}", url));
    println!("{}", url);

    Ok(())
}

/// `KEY=URL` を分割
fn parse_entry(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((key, url)) if !key.is_empty() => Ok((key.to_string(), url.to_string())),
        _ => Err(format!("expected KEY=URL, got {:?}", value)),
    }
}

/// 設定ファイルの内容
struct UrlsConfig {
    urls: Vec<(String, String)>,
}

impl<'text, 'raw> TryFrom<nojson::RawJsonValue<'text, 'raw>> for UrlsConfig {
    type Error = nojson::JsonParseError;

    fn try_from(value: nojson::RawJsonValue<'text, 'raw>) -> Result<Self, Self::Error> {
        let mut urls = Vec::new();
        for (key, url) in value.to_object()? {
            urls.push((
                key.to_unquoted_string_str()?.into_owned(),
                url.to_unquoted_string_str()?.into_owned(),
            ));
        }
        Ok(Self { urls })
    }
}

fn parse_config(text: &str) -> Result<UrlsConfig, nojson::JsonParseError> {
    let raw = nojson::RawJson::parse(text)?;
    raw.value().try_into()
}

fn log_debug(enabled: bool, message: &str) {
    if enabled {
        eprintln!("[{}] DEBUG: {}", now_timestamp(), message);
    }
}

fn now_timestamp() -> String {
    let duration = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_else(|_| std::time::Duration::from_secs(0));
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();
    format!("{}.{:03}", secs, millis)
}
