use anyhow::Result;
use clap::Parser;
use smart_grader::cli::{Cli, Command};
use smart_grader::utils::logging;
use smart_grader::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::load(cli.config.as_deref())?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    let app = App::initialize(config)?;

    match &cli.command {
        Command::Grade(args) => {
            let output = app.grade(args).await?;
            eprintln!("📥 反馈已保存至: {}", output.csv_path.display());
        }
        Command::Sample(args) => {
            let path = app.sample(args)?;
            eprintln!("📄 示例文件: {}", path.display());
        }
    }

    Ok(())
}
