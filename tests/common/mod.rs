use std::{env, fs, path::PathBuf, sync::Once};
use uuid::Uuid;

static INIT: Once = Once::new();

/// Initialize test environment with RUST_LOG=WARN
pub fn init_test_env() {
    INIT.call_once(|| {
        std::env::set_var("RUST_LOG", "warn");
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Spreadsheet export with a title row above the header and one map per difficulty
pub fn pool_sheet(difficulties: &[f64]) -> String {
    let mut sheet = String::from("Ranked Map Pool,,,,,\nMaps,Mapper,Difficulty,Ø,Background,Difficulty Level\n");
    for (i, d) in difficulties.iter().enumerate() {
        sheet.push_str(&format!(
            "Map {i},Mapper {i},Insane,https://osu.ppy.sh/beatmapsets/{i},,{d:.2}\n"
        ));
    }

    sheet
}

/// Unique path in the temp directory; `contents` is written if given
pub fn temp_file(extension: &str, contents: Option<&str>) -> PathBuf {
    let path = env::temp_dir().join(format!("placement-engine-{}.{extension}", Uuid::new_v4()));
    if let Some(contents) = contents {
        fs::write(&path, contents).unwrap();
    }

    path
}
