use figment::providers::Env;
use figment::Figment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Config {
    pub table_name: String,
    pub bucket_name: String,
    pub url_expiration: u64,
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Env::raw().only(&["TABLE_NAME", "BUCKET_NAME", "URL_EXPIRATION"]))
            .extract()
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn when_all_variables_set_should_load() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("TABLE_NAME", "todos-table");
            jail.set_env("BUCKET_NAME", "attachments-bucket");
            jail.set_env("URL_EXPIRATION", "300");

            let config = Config::load()?;

            assert_eq!(config.table_name, "todos-table");
            assert_eq!(config.bucket_name, "attachments-bucket");
            assert_eq!(config.url_expiration, 300);

            Ok(())
        });
    }
}
