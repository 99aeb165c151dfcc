use clap::Parser;

fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = reflekt_gen::Args::parse();

	reflekt_gen::run(args)
}
