// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use std::{
    fmt,
    io::{self, BufRead, Write},
    thread,
    time::Duration,
};

use clap::{App, Arg, ArgMatches};
use once_cell::sync::Lazy;
use rand::{rngs::StdRng, Rng, SeedableRng};
use regex::Regex;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use broadside::{
    board::{Cell, Grid},
    game::{CannotShootReason, SetupError, TurnReport},
    Coordinate, Fleet, Game, GameSetup, Orientation, ShipId, ShotOutcome, Side,
    TargetingAgent,
};

/// Matcher for a coordinate typed on its own, such as `3,4` or `3 4`.
static COORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<x>[0-9]+)(?:\s*,\s*|\s+)(?P<y>[0-9]+)$").unwrap());

fn main() -> io::Result<()> {
    let matches = App::new("Battleship")
        .version("1.0")
        .author("Zachary Stewart <zachary@zstewart.com>")
        .about("Command line naval combat against the computer.")
        .arg(
            Arg::with_name("first_player")
                .short("f")
                .long("first_player")
                .value_name("FIRST_PLAYER")
                .help("pre-specify which player goes first")
                .takes_value(true)
                .possible_values(&["human", "me", "computer", "bot", "random", "rand"])
                .case_insensitive(true),
        )
        .arg(
            Arg::with_name("fleet")
                .long("fleet")
                .value_name("LENGTHS")
                .help("comma separated ship lengths, defaults to 4,3,3,2,2,1,1")
                .takes_value(true)
                .validator(|v| v.parse::<Fleet>().map(|_| ()).map_err(|e| e.to_string())),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .value_name("SEED")
                .help("seed the random number generator for a reproducible game")
                .takes_value(true)
                .validator(|v| v.parse::<u64>().map(|_| ()).map_err(|e| e.to_string())),
        )
        .arg(
            Arg::with_name("delay_ms")
                .long("delay-ms")
                .value_name("MS")
                .help("pause before the computer's shot lands")
                .takes_value(true)
                .default_value("500")
                .validator(|v| v.parse::<u64>().map(|_| ()).map_err(|e| e.to_string())),
        )
        .arg(
            Arg::with_name("auto_place")
                .long("auto-place")
                .help("place your ships randomly instead of choosing positions"),
        )
        .get_matches();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // Validators above guarantee these parse.
    let fleet = match matches.value_of("fleet") {
        Some(lengths) => lengths.parse().unwrap_or_default(),
        None => Fleet::standard(),
    };
    let mut rng = match matches.value_of("seed").and_then(|s| s.parse().ok()) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let delay = Duration::from_millis(
        matches
            .value_of("delay_ms")
            .and_then(|ms| ms.parse().ok())
            .unwrap_or(0),
    );

    let stdin = std::io::stdin();
    let mut input = InputReader::new(stdin.lock());

    let agent = TargetingAgent::with_rng(fleet, StdRng::seed_from_u64(rng.gen()));
    let mut setup = GameSetup::new(agent).map_err(invalid_config)?;
    loop {
        let first = choose_first(&matches, &mut rng, &mut input)?;
        setup.set_first(first);
        if matches.is_present("auto_place") {
            setup.auto_place(&mut rng).map_err(invalid_config)?;
        } else {
            choose_placements(&mut rng, &mut setup, &mut input)?;
        }
        let mut game = match setup.start() {
            Ok(game) => game,
            // choose_placements only returns once every ship is placed.
            Err(_) => unreachable!(),
        };
        play(&mut game, delay, &mut input)?;

        let again = input.read_input_lower("Play again? (y/N)", |input| match input {
            "yes" | "y" => Some(true),
            "no" | "n" | "" => Some(false),
            _ => None,
        })?;
        if !again {
            return Ok(());
        }
        setup = game.restart().map_err(invalid_config)?;
    }
}

/// Turn a configuration problem into an error for `main`.
fn invalid_config<E>(err: E) -> io::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    io::Error::new(io::ErrorKind::InvalidInput, err)
}

/// Choose which [`Side`] fires first based on either args or cli input.
fn choose_first<B: BufRead>(
    matches: &ArgMatches,
    rng: &mut impl Rng,
    input: &mut InputReader<B>,
) -> io::Result<Side> {
    Ok(if let Some(clichoice) = matches.value_of("first_player") {
        match clichoice.to_ascii_lowercase().as_str() {
            "human" | "me" => Side::Human,
            "computer" | "bot" => Side::Computer,
            "random" | "rand" if rng.gen() => Side::Human,
            "random" | "rand" => Side::Computer,
            _ => unreachable!(),
        }
    } else {
        input.read_input_lower("Do you want to go first? (Y/n)", |input| match input {
            "yes" | "y" | "first" | "1" | "1st" | "" => Some(Side::Human),
            "no" | "n" | "second" | "2" | "2nd" => Some(Side::Computer),
            _ => {
                println!("Invalid selection.");
                None
            }
        })?
    })
}

/// Choose placements for all ships using input from the player.
fn choose_placements(
    rng: &mut impl Rng,
    setup: &mut GameSetup,
    input: &mut InputReader<impl BufRead>,
) -> io::Result<()> {
    enum Command {
        Done,
        Place(ShipId, Coordinate, Orientation),
        Unplace(ShipId),
        Rotate(ShipId),
        Clear,
        Randomize,
        Help,
    }
    println!();
    println!("Place ships. Type help or ? for commands.");
    loop {
        println!();
        /// Matcher for commands with args.
        static PLACE: Lazy<Regex> = Lazy::new(|| {
            Regex::new(
                r"^(?x)(?:place|put)\s+
        (?P<ship>\w+)\s+
        (?:(?:at|on|to|->|=>)\s+)?
        (?P<x>[0-9]+)(?:\s*,\s*|\s+)(?P<y>[0-9]+)\s+
        (?P<dir>\w+)$",
            )
            .unwrap()
        });
        static ROTATE: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^(?:rotate|turn)\s+(?P<ship>\w+)$").unwrap());
        static UNPLACE: Lazy<Regex> = Lazy::new(|| {
            Regex::new(
                r"^(?x)(?:un-?place|remove)\s+
        (?P<ship>\w+)$",
            )
            .unwrap()
        });

        if setup.ready() {
            println!("All ships placed, type done to start the game");
        } else {
            let pending: Vec<_> = setup
                .pending_ships()
                .map(|id| ShipLabel(setup.fleet(), id).to_string())
                .collect();
            println!("Remaining ships to place: {}", pending.join(", "));
        }
        println!("Your current board setup:");
        show_board(setup.human_board(), Reveal::Own);
        println!();

        let fleet = setup.fleet();
        let dim = *setup.human_board().dimensions();
        let cmd = input.read_input_lower("> ", |input| match input {
            "?" | "help" | "h" => Some(Command::Help),
            "randomize" | "rand" | "random" | "auto" => Some(Command::Randomize),
            "done" | "start" => Some(Command::Done),
            "clear" | "reset" => Some(Command::Clear),
            other => {
                if let Some(captures) = PLACE.captures(other) {
                    let ship = parse_ship(fleet, &captures["ship"])?;
                    let x = parse_axis("x", &captures["x"], dim.width())?;
                    let y = parse_axis("y", &captures["y"], dim.height())?;
                    let dir = match &captures["dir"] {
                        "h" | "horizontal" | "right" | "r" | "across" => Orientation::Horizontal,
                        "v" | "vertical" | "down" | "d" => Orientation::Vertical,
                        other => {
                            println!(
                                "invalid direction {}, choose \"horizontal\" or \"vertical\"",
                                other
                            );
                            return None;
                        }
                    };
                    Some(Command::Place(ship, Coordinate::new(x, y), dir))
                } else if let Some(captures) = ROTATE.captures(other) {
                    parse_ship(fleet, &captures["ship"]).map(Command::Rotate)
                } else if let Some(captures) = UNPLACE.captures(other) {
                    match &captures["ship"] {
                        "all" => Some(Command::Clear),
                        ship => parse_ship(fleet, ship).map(Command::Unplace),
                    }
                } else {
                    println!(
                        "Invalid ship-placement command \"{}\". Use '?' for help",
                        other
                    );
                    None
                }
            }
        })?;

        match cmd {
            Command::Done if setup.ready() => break,
            Command::Done => println!("You must place all your ships first!"),
            Command::Place(ship, start, dir) => {
                let previous = setup.unplace_ship(ship);
                let refused = match setup.place_ship(ship, start, dir) {
                    Ok(()) => false,
                    Err(SetupError::Place(reason)) => {
                        println!("Invalid placement: {}.", reason);
                        true
                    }
                    Err(err) => {
                        println!("{}.", err);
                        true
                    }
                };
                // Put a moved ship back where it was.
                if let (true, Some(old)) = (refused, previous) {
                    if let Err(err) = setup.place_ship(ship, old.anchor(), old.orientation()) {
                        debug!(%err, %ship, "could not restore ship");
                    }
                }
            }
            Command::Unplace(ship) => {
                setup.unplace_ship(ship);
            }
            Command::Rotate(ship) => match setup.rotate_ship(ship) {
                Ok(_) => {}
                Err(SetupError::Place(reason)) => println!("Cannot rotate: {}.", reason),
                Err(err) => println!("{}.", err),
            },
            Command::Clear => setup.reset_ships(),
            Command::Randomize => {
                if let Err(err) = setup.auto_place(rng) {
                    println!("Could not place the fleet: {}.", err);
                }
            }
            Command::Help => {
                println!(
                    "Available Commands:
    done                        if all ships are placed, start the game.
    place <ship> <x>,<y> <dir>  place the ship with its top left cell at the given coordinate.
        Possible directions are \"horizontal\" (\"h\") and \"vertical\" (\"v\").
        Ships may not touch, not even at the corners.
    rotate <ship>               turn a placed ship about its top left cell.
    unplace <ship>              clear the placement of the specified ship.
        Additionally \"all\" may be specified to clear all placements.
    clear                       clears all ship placements.
    randomize                   randomly place the whole fleet.

Ships are named by number or by name without spaces:"
                );
                for (id, ship) in setup.fleet().iter() {
                    println!(
                        "    {:>3}  {:<12} length {}",
                        id,
                        compact_name(ship.name()),
                        ship.len()
                    );
                }
            }
        }
    }
    Ok(())
}

/// Look up a ship by id number or by its name with spaces removed.
fn parse_ship(fleet: &Fleet, token: &str) -> Option<ShipId> {
    let found = match token.parse::<u8>() {
        Ok(n) => ShipId::new(n).filter(|&id| fleet.get(id).is_some()),
        Err(_) => fleet
            .iter()
            .find(|(_, ship)| compact_name(ship.name()) == token)
            .map(|(id, _)| id),
    };
    if found.is_none() {
        println!("invalid ship: {}, type help for the list of ships", token);
    }
    found
}

/// Lowercase name with whitespace removed, as typed in commands.
fn compact_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Parse one coordinate component, printing a message if it is not on the board.
fn parse_axis(axis: &str, value: &str, size: usize) -> Option<usize> {
    match value.parse() {
        Ok(v) if v < size => Some(v),
        _ => {
            println!("{} must be in range [0,{}], got {}", axis, size - 1, value);
            None
        }
    }
}

/// Run the play phase until either side wins.
fn play<B: BufRead>(game: &mut Game, delay: Duration, input: &mut InputReader<B>) -> io::Result<()> {
    println!();
    println!("Fire by typing a coordinate, such as 3,4.");
    while game.winner().is_none() {
        match game.current() {
            Side::Human => {
                println!();
                println!("Enemy waters:");
                show_board(game.computer_board(), Reveal::Enemy);
                println!();
                println!("Your fleet:");
                show_board(game.human_board(), Reveal::Own);
                println!();

                let dim = *game.computer_board().dimensions();
                let coord = input.read_input("Fire at x,y:", |input| {
                    let captures = match COORD.captures(input) {
                        Some(captures) => captures,
                        None => {
                            println!("Type a coordinate as x,y.");
                            return None;
                        }
                    };
                    let x = parse_axis("x", &captures["x"], dim.width())?;
                    let y = parse_axis("y", &captures["y"], dim.height())?;
                    Some(Coordinate::new(x, y))
                })?;
                match game.fire(coord) {
                    Ok(report) => announce(game, &report),
                    Err(CannotShootReason::AlreadyShot) => println!("You already fired there."),
                    Err(err) => println!("{}.", err),
                }
            }
            Side::Computer => {
                thread::sleep(delay);
                match game.computer_turn() {
                    Ok(report) => announce(game, &report),
                    Err(err) => {
                        debug!(%err, "computer could not fire");
                        return Ok(());
                    }
                }
            }
        }
    }

    println!();
    println!("Final boards:");
    println!("Enemy fleet:");
    show_board(game.computer_board(), Reveal::Own);
    println!("Your fleet:");
    show_board(game.human_board(), Reveal::Own);
    match game.winner() {
        Some(Side::Human) => println!("You won!"),
        Some(Side::Computer) => println!("You lost. The computer sank your fleet."),
        None => {}
    }
    Ok(())
}

/// Print what a shot did.
fn announce(game: &Game, report: &TurnReport) {
    let who = match report.shooter {
        Side::Human => "You fire",
        Side::Computer => "The computer fires",
    };
    let what = match report.outcome {
        ShotOutcome::Miss => "miss".to_owned(),
        ShotOutcome::Hit(_) => "hit!".to_owned(),
        ShotOutcome::AlreadyShot => "already shot".to_owned(),
    };
    println!("{} at {}: {}", who, report.coord, what);
    if let Some(id) = report.sunk {
        let whose = match report.shooter {
            Side::Human => "Enemy",
            Side::Computer => "Your",
        };
        println!("{} {} was sunk!", whose, ShipLabel(game.fleet(), id));
    }
}

/// How much of a board to show.
#[derive(Copy, Clone, Eq, PartialEq)]
enum Reveal {
    /// Show ships that were not hit.
    Own,
    /// Show only cells that were shot.
    Enemy,
}

/// A single cell as printed.
enum ShownCell {
    Water,
    Shot,
    Ship(ShipId),
    Hit(ShipId),
    Sunk(ShipId),
}

impl fmt::Display for ShownCell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ShownCell::Water => f.pad("~~"),
            ShownCell::Shot => f.pad("x"),
            ShownCell::Ship(id) => f.pad(&id.to_string()),
            ShownCell::Hit(id) => f.pad(&format!("x{}", id)),
            ShownCell::Sunk(id) => f.pad(&format!("X{}", id)),
        }
    }
}

/// Print out the board by rows with coordinate labels.
fn show_board(grid: &Grid, reveal: Reveal) {
    print!("   ");
    for i in 0..grid.dimensions().width() {
        print!("{:^4}", i);
    }
    println!();
    for (i, row) in grid.rows().enumerate() {
        print!("{:>2} ", i);
        for &cell in row {
            let shown = match cell {
                Cell::Empty => ShownCell::Water,
                Cell::Ship(_) if reveal == Reveal::Enemy => ShownCell::Water,
                Cell::Ship(id) => ShownCell::Ship(id),
                Cell::Miss => ShownCell::Shot,
                Cell::Hit(id) if grid.ship_sunk(id) => ShownCell::Sunk(id),
                Cell::Hit(id) => ShownCell::Hit(id),
            };
            print!("{:^4}", shown);
        }
        println!();
    }
}

/// Display helper that prints a ship's name and length.
struct ShipLabel<'a>(&'a Fleet, ShipId);

impl fmt::Display for ShipLabel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0.get(self.1) {
            Some(ship) => write!(f, "{} ({}, length {})", ship.name(), self.1, ship.len()),
            None => write!(f, "ship {}", self.1),
        }
    }
}

/// Helper to read input from the player.
struct InputReader<B> {
    read: B,
    buf: String,
}

impl<B> InputReader<B> {
    fn new(read: B) -> Self {
        Self {
            read,
            buf: String::new(),
        }
    }
}

impl<B: BufRead> InputReader<B> {
    /// Repeatedly tries to read input until the input checker returns `Some`. Converts
    /// to ascii lower before running the checker.
    fn read_input_lower<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            self.buf.make_ascii_lowercase();
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Repeatedly tries to read input until the input checker returns `Some`.
    fn read_input<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Helper to print the prompt, clear the string buffer and read a line.
    fn read_input_inner(&mut self, prompt: &str) -> io::Result<()> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        self.buf.clear();
        if self.read.read_line(&mut self.buf)? == 0 {
            println!();
            std::process::exit(0);
        }
        Ok(())
    }
}
