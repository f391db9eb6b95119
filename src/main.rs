use clap::Parser;
use trivia_quiz::{Difficulty, Quiz};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Skip the selector and start at this difficulty
    #[arg(short, long, value_enum)]
    difficulty: Option<Difficulty>,
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();
    let args = Args::parse();

    let quiz = match Quiz::new(args.difficulty) {
        Ok(quiz) => quiz,
        Err(e) => {
            eprintln!("Failed to start quiz: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = quiz.run().await {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
