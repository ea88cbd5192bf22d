use kana_shuffle_core::model::kana::KanaType;
use kana_shuffle_core::model::link::LinkParams;
use kana_shuffle_core::model::rows::{parse_rows, RowGroup};
use kana_shuffle_core::model::seed::SeedChoice;
use kana_shuffle_core::{Generator, Grid, GridInput};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=debug shows pool sizes, caps and fallback usage
    env_logger::init();

    // The generator is stateless: one instance serves every grid
    let generator = Generator::new();

    // Start from the defaults: hiragana, no dakuten, every row, daily seed
    let mut input = GridInput::new(KanaType::Hiragana);

    // Print romaji under each kana
    input.show_romaji = true;

    // The seed can be
    // 'Daily' for the seed of the day ("dayYYYYMMDD")
    // 'Custom' for a user seed (lowercased, non alphanumerics removed)
    // 'Random' for a fresh seed of n characters (0 for the default length)
    input.seed = SeedChoice::Custom("Flashcards 101".to_owned());

    let grid = generator.generate(&input)?;
    print_grid("Hiragana, custom seed", &grid);

    // Same seed, katakana: the same positions, the other script
    input.kana_type = KanaType::Katakana;
    let grid = generator.generate(&input)?;
    print_grid("Katakana, same seed", &grid);

    // Narrow the pool to a few rows and add the voiced forms.
    // Once rows are selected the per-kana cap is lifted, so the
    // grid keeps drawing from every kana left in the pool.
    input.set_rows(parse_rows("k,s,t"));
    input.dakuten = true;
    input.seed = SeedChoice::Random(0);
    let grid = generator.generate(&input)?;
    print_grid("K/S/T rows with dakuten, random seed", &grid);

    // The share link pins the resolved seed, so the grid can be replayed
    let link = grid.link_params();
    println!("Share link: {}", link.share_url("https://example.org/kana/"));
    let replay = generator.generate(&link.to_grid_input()?)?;
    println!("Replay identical: {}\n", replay == grid);

    // A single-row pool still fills all 50 cells
    input.set_rows([RowGroup::Y]);
    input.dakuten = false;
    let grid = generator.generate(&input)?;
    print_grid("Y row only", &grid);

    // An invalid seed grammar in a link is reported, not guessed
    let bad = LinkParams { seed: Some("random:lots".to_owned()), ..LinkParams::default() };
    match bad.to_grid_input() {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Rejected link: {e}"),
    }

    // And so is an empty grid
    let mut empty = GridInput::default();
    empty.grid_size = 0;
    match generator.generate(&empty) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Rejected input: {e}"),
    }

    Ok(())
}

fn print_grid(title: &str, grid: &Grid) {
    println!("{title} (seed: {})", grid.seed);
    for line in grid.lines(10) {
        let kana: Vec<&str> = line.iter().map(|cell| cell.kana.as_str()).collect();
        let romaji: Vec<String> = line.iter().map(|cell| format!("{:<3}", cell.romaji)).collect();
        println!("  {}", kana.join("  "));
        if grid.show_romaji {
            println!("  {}", romaji.join(" "));
        }
    }
    println!();
}
