use std::iter::zip;

use anyhow::{bail, Context, Result};
use arrayvec::ArrayVec;
use bitvec::prelude::*;
use itertools::Itertools;
use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::almanac::{lowest_location, Almanac, SeedMode};

fn gcd(a: u64, b: u64) -> u64 {if b == 0 {a} else {gcd(b, a % b)}}
fn lcm(a: u64, b: u64) -> u64 {a / gcd(a, b) * b}

////////////////////////////////////////////////////////////////////////////////

pub fn day2(part: u8, input: &str) -> Result<String> {
    let game_re = Regex::new(r"^Game (\d+):(.*)$")?;
    let cube_re = Regex::new(r"(\d+) (red|green|blue)")?;
    let mut total = 0u32;
    for line in input.trim().lines() {
        let (_, [id, sets]) = game_re.captures(line.trim())
            .with_context(|| format!("cannot parse game {:?}", line))?
            .extract();
        // the largest draw of each colour decides both parts
        let mut most = [0u32; 3];
        for cube in cube_re.captures_iter(sets) {
            let (_, [count, colour]) = cube.extract();
            let slot = match colour {"red" => 0, "green" => 1, _ => 2};
            most[slot] = most[slot].max(count.parse()?);
        }
        total += if part == 1 {
            if most[0] <= 12 && most[1] <= 13 && most[2] <= 14 {id.parse::<u32>()?} else {0}
        } else {
            most.iter().product::<u32>()
        };
    }
    Ok(total.to_string())
}

pub fn day3(part: u8, input: &str) -> Result<String> {
    let number_re = Regex::new(r"\d+")?;
    let lines = input.trim().lines().map(str::trim).collect::<Vec<_>>();
    let mut part_sum = 0u64;
    let mut gears: FxHashMap<(usize, usize), Vec<u64>> = FxHashMap::default();

    for (ri, line) in lines.iter().enumerate() {
        for m in number_re.find_iter(line) {
            let number: u64 = m.as_str().parse()?;
            let mut is_part = false;
            for rj in ri.saturating_sub(1) ..= ri + 1 {
                let Some(row) = lines.get(rj).map(|row| row.as_bytes()) else {continue};
                for cj in m.start().saturating_sub(1) .. (m.end() + 1).min(row.len()) {
                    match row[cj] {
                        b'.' | b'0' ..= b'9' => (),
                        symbol => {
                            is_part = true;
                            if symbol == b'*' {gears.entry((rj, cj)).or_default().push(number)}
                        }
                    }
                }
            }
            if is_part {part_sum += number}
        }
    }

    if part == 1 {
        Ok(part_sum.to_string())
    } else {
        Ok(gears.values().filter(|numbers| numbers.len() > 1)
                .map(|numbers| numbers.iter().product::<u64>())
                .sum::<u64>().to_string())
    }
}

pub fn day4(part: u8, input: &str) -> Result<String> {
    let matches = input.trim().lines().map(|line| {
        let (_, numbers) = line.split_once(':').with_context(|| format!("no card label in {:?}", line))?;
        let (winning, have) = numbers.split_once('|').with_context(|| format!("no '|' in {:?}", line))?;
        let winning = winning.split_whitespace().map(str::parse::<u32>).collect::<Result<FxHashSet<_>, _>>()?;
        let have = have.split_whitespace().map(str::parse::<u32>).collect::<Result<FxHashSet<_>, _>>()?;
        Ok(winning.intersection(&have).count())
    }).collect::<Result<Vec<_>>>()?;

    if part == 1 {
        Ok(matches.iter().filter(|&&n| n > 0).map(|&n| 1u64 << (n - 1)).sum::<u64>().to_string())
    } else {
        let mut copies = vec![1u64; matches.len()];
        for ci in 0 .. copies.len() {
            for cj in ci + 1 .. (ci + 1 + matches[ci]).min(copies.len()) {
                copies[cj] += copies[ci];
            }
        }
        Ok(copies.iter().sum::<u64>().to_string())
    }
}

pub fn day5(part: u8, input: &str) -> Result<String> {
    let almanac = Almanac::parse(input)?;
    let mode = if part == 1 {SeedMode::Individual} else {SeedMode::Ranges};
    Ok(lowest_location(&almanac, mode)?.to_string())
}

/// Hold times `h` in `0 ..= time` beating `record`. Distance `h * (time - h)` peaks at
/// `time / 2` and is symmetric around it.
fn ways_to_win(time: u64, record: u64) -> u64 {
    let half = time / 2;
    if half * (time - half) <= record {return 0}
    let (mut lo, mut hi) = (0, half);
    while lo < hi {
        let mid = (lo + hi) / 2;
        if mid * (time - mid) > record {hi = mid} else {lo = mid + 1}
    }
    time + 1 - 2 * lo
}

pub fn day6(part: u8, input: &str) -> Result<String> {
    let rows = input.trim().lines().map(|line| {
        let (_, numbers) = line.split_once(':').with_context(|| format!("no label in {:?}", line))?;
        if part == 1 {
            Ok(numbers.split_whitespace().map(str::parse::<u64>).collect::<Result<Vec<_>, _>>()?)
        } else {
            Ok(vec![numbers.chars().filter(char::is_ascii_digit).collect::<String>().parse::<u64>()?])
        }
    }).collect::<Result<Vec<_>>>()?;
    let [times, records] = &rows[..] else {bail!("expected a time line and a distance line")};
    if times.len() != records.len() {bail!("{} races but {} records", times.len(), records.len())}
    Ok(zip(times, records).map(|(&time, &record)| ways_to_win(time, record)).product::<u64>().to_string())
}

/// Orders by type (group sizes, largest first) and then by card values left to right.
/// Jokers join the largest group and are worth the least.
fn hand_strength(cards: &str, jokers: bool) -> Result<(ArrayVec<u8, 5>, [u8; 5])> {
    let order: &[u8] = if jokers {b"J23456789TQKA"} else {b"23456789TJQKA"};
    let cards = cards.as_bytes();
    if cards.len() != 5 {bail!("a hand has 5 cards, not {:?}", String::from_utf8_lossy(cards))}

    let mut values = [0u8; 5];
    for (value, card) in zip(&mut values, cards) {
        *value = order.iter().position(|c| c == card)
            .with_context(|| format!("unknown card {:?}", *card as char))? as u8;
    }

    let mut counts = cards.iter().copied().counts();
    let wild = if jokers {counts.remove(&b'J').unwrap_or(0) as u8} else {0};
    let mut groups: ArrayVec<u8, 5> = counts.values().map(|&n| n as u8).sorted_unstable().rev().collect();
    match groups.first_mut() {
        Some(largest) => *largest += wild,
        None => groups.push(wild),
    }
    Ok((groups, values))
}

pub fn day7(part: u8, input: &str) -> Result<String> {
    let mut hands = input.trim().lines().map(|line| {
        let (cards, bid) = line.split_whitespace().collect_tuple()
            .with_context(|| format!("cannot parse {:?} as hand and bid", line))?;
        Ok((hand_strength(cards, part == 2)?, bid.parse::<u64>()?))
    }).collect::<Result<Vec<_>>>()?;
    hands.sort_unstable();
    Ok(hands.iter().enumerate().map(|(rank, (_, bid))| (rank as u64 + 1) * bid).sum::<u64>().to_string())
}

fn steps_until<'a>(
    network: &FxHashMap<&'a str, (&'a str, &'a str)>, turns: &[u8], start: &'a str, done: impl Fn(&str) -> bool
) -> Result<u64> {
    let mut node = start;
    for (step, turn) in turns.iter().cycle().enumerate() {
        if done(node) {return Ok(step as u64)}
        let &(left, right) = network.get(node).with_context(|| format!("no node {}", node))?;
        node = match turn {
            b'L' => left, b'R' => right,
            _ => bail!("unexpected turn '{}'", *turn as char)
        };
    }
    bail!("no turns to take from {}", start)
}

pub fn day8(part: u8, input: &str) -> Result<String> {
    let node_re = Regex::new(r"(\w+) = \((\w+), (\w+)\)")?;
    let mut lines = input.trim().lines();
    let turns = lines.next().context("missing turn instructions")?.trim().as_bytes();
    let network = lines.filter(|line| !line.trim().is_empty()).map(|line| {
        let (_, [node, left, right]) = node_re.captures(line)
            .with_context(|| format!("cannot parse node {:?}", line))?
            .extract();
        Ok((node, (left, right)))
    }).collect::<Result<FxHashMap<_, _>>>()?;

    if part == 1 {
        Ok(steps_until(&network, turns, "AAA", |node| node == "ZZZ")?.to_string())
    } else {
        // every ghost walks a cycle that first reaches its ..Z node after a whole period
        network.keys().filter(|node| node.ends_with('A'))
               .map(|&start| steps_until(&network, turns, start, |node| node.ends_with('Z')))
               .fold_ok(1, lcm)
               .map(|steps| steps.to_string())
    }
}

/// Next and previous values of a history, from the ends of its difference rows.
fn extrapolate(history: Vec<i64>) -> (i64, i64) {
    let (mut previous, mut next, mut sign) = (0, 0, 1);
    let mut row = history;
    while row.iter().any(|&x| x != 0) {
        next += row[row.len() - 1];
        previous += sign * row[0];
        sign = -sign;
        row = row.iter().tuple_windows().map(|(a, b)| b - a).collect();
    }
    (previous, next)
}

pub fn day9(part: u8, input: &str) -> Result<String> {
    input.trim().lines().map(|line| {
        let history = line.split_whitespace().map(str::parse::<i64>).collect::<Result<Vec<_>, _>>()?;
        let (previous, next) = extrapolate(history);
        Ok(if part == 1 {next} else {previous})
    }).sum::<Result<i64>>().map(|sum| sum.to_string())
}

const NORTH: u8 = 1;
const EAST: u8 = 2;
const SOUTH: u8 = 4;
const WEST: u8 = 8;

fn pipe_exits(tile: u8) -> u8 {
    match tile {
        b'|' => NORTH | SOUTH, b'-' => EAST | WEST,
        b'L' => NORTH | EAST, b'J' => NORTH | WEST,
        b'7' => SOUTH | WEST, b'F' => SOUTH | EAST,
        _ => 0
    }
}

fn opposite(dir: u8) -> u8 {(dir << 2 | dir >> 2) & 0xF}

fn step(ri: usize, ci: usize, dir: u8) -> Option<(usize, usize)> {
    match dir {
        NORTH => Some((ri.checked_sub(1)?, ci)), EAST => Some((ri, ci + 1)),
        SOUTH => Some((ri + 1, ci)), WEST => Some((ri, ci.checked_sub(1)?)),
        _ => None
    }
}

pub fn day10(part: u8, input: &str) -> Result<String> {
    let grid = input.trim().lines().map(|line| line.trim().as_bytes()).collect::<Vec<_>>();
    let width = grid.first().map_or(0, |row| row.len());
    let tile = |ri: usize, ci: usize| grid.get(ri).and_then(|row| row.get(ci)).copied();

    let (start_ri, start_ci) = (0 .. grid.len()).find_map(|ri|
        grid[ri].iter().position(|&t| t == b'S').map(|ci| (ri, ci))
    ).context("no start tile")?;
    let start_exits = [NORTH, EAST, SOUTH, WEST].into_iter().filter(|&dir|
        step(start_ri, start_ci, dir).and_then(|(ri, ci)| tile(ri, ci))
                                     .is_some_and(|t| pipe_exits(t) & opposite(dir) != 0)
    ).fold(0, |exits, dir| exits | dir);
    if start_exits.count_ones() != 2 {
        bail!("start tile connects to {} pipes", start_exits.count_ones())
    }
    let exits_at = |ri: usize, ci: usize|
        if (ri, ci) == (start_ri, start_ci) {start_exits} else {tile(ri, ci).map_or(0, pipe_exits)};

    let mut on_loop = bitvec![0; grid.len() * width];
    let (mut ri, mut ci) = (start_ri, start_ci);
    let mut dir = start_exits & start_exits.wrapping_neg();
    let mut loop_len = 0;
    loop {
        on_loop.set(ri * width + ci, true);
        loop_len += 1;
        (ri, ci) = step(ri, ci, dir).context("loop runs off the map")?;
        if (ri, ci) == (start_ri, start_ci) {break}
        let exits = exits_at(ri, ci);
        if ci >= width || exits & opposite(dir) == 0 {
            bail!("loop breaks at ({}, {})", ri, ci)
        }
        dir = exits & !opposite(dir);
    }

    if part == 1 {
        Ok(((loop_len + 1) / 2).to_string())
    } else {
        // a scanline crosses the loop at every pipe reaching north
        Ok((0 .. grid.len()).map(|ri| {
            let mut inside = false;
            (0 .. width).filter(|&ci| {
                if on_loop[ri * width + ci] {
                    if exits_at(ri, ci) & NORTH != 0 {inside = !inside}
                    false
                } else {inside}
            }).count()
        }).sum::<usize>().to_string())
    }
}

fn galaxy_distances(input: &str, expansion: u64) -> u64 {
    let grid = input.trim().lines().map(|line| line.trim().as_bytes()).collect::<Vec<_>>();
    let width = grid.iter().map(|row| row.len()).max().unwrap_or(0);
    let galaxies = grid.iter().enumerate().flat_map(|(ri, row)|
        row.iter().positions(|&t| t == b'#').map(move |ci| (ri, ci))
    ).collect::<Vec<_>>();

    let mut busy_rows = bitvec![0; grid.len()];
    let mut busy_cols = bitvec![0; width];
    for &(ri, ci) in &galaxies {
        busy_rows.set(ri, true);
        busy_cols.set(ci, true);
    }
    // expanded coordinate of every original row / column
    let stretch = |busy: &BitVec| busy.iter().scan(0, |at, is_busy| {
        let here = *at;
        *at += if *is_busy {1} else {expansion};
        Some(here)
    }).collect::<Vec<u64>>();
    let (row_at, col_at) = (stretch(&busy_rows), stretch(&busy_cols));

    galaxies.iter().map(|&(ri, ci)| (row_at[ri], col_at[ci]))
            .tuple_combinations()
            .map(|((r1, c1), (r2, c2))| r1.abs_diff(r2) + c1.abs_diff(c2))
            .sum()
}

pub fn day11(part: u8, input: &str) -> Result<String> {
    Ok(galaxy_distances(input, if part == 1 {2} else {1_000_000}).to_string())
}
