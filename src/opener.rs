use crate::error::{Result, ViewsError};
use tokio::process::Command;

/// 既定ブラウザでURLを開く
pub async fn open_in_browser(url: &str) -> Result<()> {
    run_opener(opener_command(url)).await
}

#[cfg(windows)]
fn opener_command(url: &str) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/c", "start", "", url]);
    command
}

#[cfg(target_os = "macos")]
fn opener_command(url: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(url);
    command
}

#[cfg(all(unix, not(target_os = "macos")))]
fn opener_command(url: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(url);
    command
}

async fn run_opener(mut command: Command) -> Result<()> {
    let status = command.status().await?;
    if !status.success() {
        return Err(ViewsError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("ブラウザ起動コマンドが失敗しました (code {:?})", status.code()),
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_opener_is_io_error() {
        let result = run_opener(Command::new("views-ocr-no-such-opener")).await;
        assert!(matches!(result, Err(ViewsError::Io(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_opener_is_io_error() {
        let result = run_opener(Command::new("false")).await;
        let err = result.unwrap_err();
        assert!(err.to_string().contains("ブラウザ起動コマンド"));
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn test_opener_command_passes_url() {
        let command = opener_command("http://127.0.0.1:5000/");
        let std_command = command.as_std();
        assert_eq!(std_command.get_program(), "xdg-open");
        assert_eq!(
            std_command.get_args().collect::<Vec<_>>(),
            vec!["http://127.0.0.1:5000/"]
        );
    }
}
