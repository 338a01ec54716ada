use super::Host;
use super::config::{CONFIG_FILE_NAME, Config};
use crate::Result;
use camino::Utf8PathBuf;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output configuration file path (default is `csv-wiki.toml` in the current directory)
    #[arg(value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,
}

pub fn init_config<H: Host>(host: &mut H, args: &InitArgs) -> Result<()> {
    let output = args.output.clone().unwrap_or_else(|| Utf8PathBuf::from(CONFIG_FILE_NAME));

    Config::save_default(&output)?;
    let _ = writeln!(host.output(), "Generated default configuration file: {output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;

    #[test]
    fn test_init_writes_loadable_config() {
        let tmp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let path = root.join(CONFIG_FILE_NAME);

        let mut host = TestHost::new();
        init_config(&mut host, &InitArgs { output: Some(path.clone()) }).unwrap();

        assert!(host.output_text().contains(path.as_str()));
        assert_eq!(Config::load(&root, None).unwrap(), Config::default());
    }

    #[test]
    fn test_init_into_missing_directory_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("missing").join(CONFIG_FILE_NAME)).unwrap();

        let mut host = TestHost::new();
        let _ = init_config(&mut host, &InitArgs { output: Some(path) }).unwrap_err();
        assert!(host.output_buf.is_empty());
    }
}
