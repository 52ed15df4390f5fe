//! Helpers for integration tests.

use std::fs;

use tempfile::TempDir;

use streamcompare::models::config::{OptimizerConfig, ServerConfig};
use streamcompare::repository::csv::{CsvCatalog, GAMES_FILE, OFFERS_FILE, PACKAGES_FILE};

/// Temporary on-disk catalog used in integration tests.
///
/// Three games: Bayern München plays twice in the Bundesliga, Real Madrid
/// once in La Liga. Package 1 carries Bayern live, package 2 carries La
/// Liga plus Bayern highlights, package 3 carries Bayern fully, package 4
/// is free with La Liga highlights only.
pub struct TestCatalog {
    _tempdir: TempDir,
    catalog: CsvCatalog,
}

const GAMES: &str = "\
id,team_home,team_away,starts_at,tournament_name
1,Bayern München,Borussia Dortmund,2024-06-14 19:00:00,Bundesliga
2,Bayern München,RB Leipzig,2024-06-21 19:00:00,Bundesliga
3,Real Madrid,FC Barcelona,2024-07-01 20:00:00,La Liga
";

const PACKAGES: &str = "\
id,name,monthly_price_cents,monthly_price_yearly_subscription_in_cents
1,Sky Sport,500,450
2,DAZN,700,600
3,Magenta Sport,300,250
4,Free TV,,0
";

const OFFERS: &str = "\
game_id,streaming_package_id,live,highlights
1,1,1,1
2,1,1,0
1,2,0,1
3,2,1,1
1,3,1,1
2,3,1,1
3,4,0,1
";

impl TestCatalog {
    pub fn new() -> Self {
        let tempdir = TempDir::new().expect("failed to create temp dir");
        fs::write(tempdir.path().join(GAMES_FILE), GAMES).expect("failed to write games csv");
        fs::write(tempdir.path().join(PACKAGES_FILE), PACKAGES)
            .expect("failed to write packages csv");
        fs::write(tempdir.path().join(OFFERS_FILE), OFFERS).expect("failed to write offers csv");
        let catalog = CsvCatalog::load(tempdir.path()).expect("failed to load catalog");
        TestCatalog {
            _tempdir: tempdir,
            catalog,
        }
    }

    pub fn catalog(&self) -> CsvCatalog {
        self.catalog.clone()
    }
}

pub fn test_config() -> ServerConfig {
    ServerConfig {
        bind_address: "127.0.0.1".to_string(),
        port: 0,
        data_dir: String::new(),
        optimizer: OptimizerConfig::default(),
    }
}
