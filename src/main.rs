use anscombe::{Analysis, BitmapRenderer, Config};

fn main() -> anyhow::Result<()> {
    anscombe::log::init_log()?;

    let config = Config::default();
    let renderer = BitmapRenderer::new(config.plot.clone());
    let report = Analysis::new(renderer, &config.output_dir).run(anscombe::quartet());

    for line in report.summary_lines() {
        println!("{}", line);
    }
    report.check()?;
    Ok(())
}
