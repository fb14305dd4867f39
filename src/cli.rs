use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "cardiocheck")]
#[command(about = "Submit a heart-disease risk form and save the assessment report", long_about = None)]
#[command(version)]
pub struct Cli {
    /// JSON object of form control id to value (`patientid` included)
    pub form: PathBuf,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn form_and_config_are_parsed() {
        let cli = Cli::try_parse_from(["cardiocheck", "form.json", "--config", "cc.toml"]).unwrap();
        assert_eq!(cli.form, PathBuf::from("form.json"));
        assert_eq!(cli.config, Some(PathBuf::from("cc.toml")));

        let cli = Cli::try_parse_from(["cardiocheck", "-c", "cc.toml", "form.json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("cc.toml")));
    }

    #[test]
    fn help_is_not_taken_as_a_form_path() {
        let err = Cli::try_parse_from(["cardiocheck", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn config_flag_without_value_is_an_error() {
        let err = Cli::try_parse_from(["cardiocheck", "form.json", "--config"]).unwrap_err();
        assert_ne!(err.kind(), ErrorKind::DisplayHelp);
        assert!(err.to_string().contains("--config"));
    }

    #[test]
    fn form_path_is_required() {
        let err = Cli::try_parse_from(["cardiocheck"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }
}
