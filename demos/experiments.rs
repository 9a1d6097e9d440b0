//! Simple experiments driving the list variants through the shared
//! sequence-container contract.
//!
//! Every experiment below is written against [`SimpleList`]/[`SeqCursor`]
//! only, and the whole battery runs twice: once over the sentinel-based
//! [`List`] and once over the sentinel-free [`LinearList`]. The output of
//! the two runs should be interchangeable (up to randomness), including the
//! fail-fast probe at the end.
//!
//! Run with `cargo run --example experiments`.

use cdll::{CursorError, LinearList, List, SeqCursor, SimpleList};
use rand::Rng;

fn main() -> Result<(), CursorError> {
    println!("*** Circular list with a sentinel ***\n");
    run_battery::<List<String>>()?;

    println!("*** Linear list without a sentinel ***\n");
    run_battery::<LinearList<String>>()
}

fn run_battery<L: SimpleList<String> + Default>() -> Result<(), CursorError> {
    expt_add_described::<L>()?;
    expt_remove_alternating_forward::<L>()?;
    expt_remove_random_forward::<L>()?;
    expt_random_walk_removal::<L>(3);
    expt_remove_random_backward::<L>()?;
    expt_remove_alternating_backward::<L>()?;
    expt_fail_fast::<L>();
    Ok(())
}

// +-----------+---------------------------------------------------
// | Utilities |
// +-----------+

/// Print a list as an ordered, index-tagged listing.
fn print_list<L: SimpleList<String>>(list: &L) {
    for (index, value) in list.values().enumerate() {
        print!("{}:{}\t", index, value);
    }
    println!();
}

/// Add a sequence of elements, describing what happens.
fn add_described<L: SimpleList<String>>(list: &mut L, values: &[&str]) -> Result<(), CursorError> {
    let mut cursor = list.list_cursor();
    for value in values {
        println!("Add {:?} at position {}", value, cursor.next_index(list)?);
        cursor.add(list, value.to_string())?;
        print_list(list);
        println!();
    }
    Ok(())
}

/// Add a sequence of elements, without describing what happens.
fn add_silently<L: SimpleList<String>>(list: &mut L, values: &[&str]) -> Result<(), CursorError> {
    let mut cursor = list.list_cursor();
    for value in values {
        cursor.add(list, value.to_string())?;
    }
    print_list(list);
    println!();
    Ok(())
}

/// Remove the elements matching `pred`, moving forward.
fn remove_forward<L>(list: &mut L, mut pred: impl FnMut(&str) -> bool) -> Result<(), CursorError>
where
    L: SimpleList<String>,
{
    let mut cursor = list.list_cursor();
    while cursor.has_next(list)? {
        let value = cursor.next(list)?.clone();
        if pred(&value) {
            println!("Remove {}", value);
            cursor.remove(list)?;
            print_list(list);
            println!();
        }
    }
    Ok(())
}

/// Remove the elements matching `pred`, moving backward from the end.
fn remove_backward<L>(list: &mut L, mut pred: impl FnMut(&str) -> bool) -> Result<(), CursorError>
where
    L: SimpleList<String>,
{
    let mut cursor = list.list_cursor();
    while cursor.has_next(list)? {
        cursor.next(list)?;
    }
    while cursor.has_previous(list)? {
        let value = cursor.previous(list)?.clone();
        if pred(&value) {
            println!("Remove {}", value);
            cursor.remove(list)?;
            print_list(list);
            println!();
        }
    }
    Ok(())
}

/// Randomly remove `removals` elements, wandering forward and backward
/// between removals.
fn random_walk_removal<L>(list: &mut L, removals: usize) -> Result<(), CursorError>
where
    L: SimpleList<String>,
{
    let mut rng = rand::thread_rng();
    let mut cursor = list.list_cursor();
    for _ in 0..removals {
        let mut value = String::new();
        for _ in 0..5 {
            if !cursor.has_next(list)? || (cursor.has_previous(list)? && rng.gen_range(0..2) == 0)
            {
                if let Some(index) = cursor.previous_index(list)? {
                    println!("Backward to {}", index);
                }
                value = cursor.previous(list)?.clone();
            } else {
                println!("Forward to {}", cursor.next_index(list)?);
                value = cursor.next(list)?.clone();
            }
        }
        println!("Removing {}", value);
        cursor.remove(list)?;
        print_list(list);
    }
    Ok(())
}

// +-------------+-------------------------------------------------
// | Experiments |
// +-------------+

fn expt_add_described<L: SimpleList<String> + Default>() -> Result<(), CursorError> {
    println!("Experiment 1: Add a variety of elements.");
    let mut list = L::default();
    add_described(&mut list, &["A", "B", "C"])?;
    add_described(&mut list, &["X", "Y", "Z"])?;
    println!();
    Ok(())
}

fn expt_remove_alternating_forward<L: SimpleList<String> + Default>() -> Result<(), CursorError> {
    println!("Experiment 2: Remove alternating elements, moving forward.");
    let mut list = L::default();
    add_silently(&mut list, &["A", "B", "C", "D", "E", "F", "G"])?;
    let mut count = 0usize;
    remove_forward(&mut list, |_| {
        let hit = count % 2 == 0;
        count += 1;
        hit
    })?;
    println!();
    Ok(())
}

fn expt_remove_random_forward<L: SimpleList<String> + Default>() -> Result<(), CursorError> {
    println!("Experiment 3: Remove random elements, moving forward.");
    let mut list = L::default();
    add_silently(&mut list, &["A", "B", "C", "D", "E", "F", "G"])?;
    let mut rng = rand::thread_rng();
    remove_forward(&mut list, move |_| rng.gen_range(0..2) == 0)?;
    println!();
    Ok(())
}

fn expt_random_walk_removal<L: SimpleList<String> + Default>(removals: usize) {
    println!("Experiment 4: Removing elements with a random walk.");
    let mut list = L::default();
    let outcome = add_silently(&mut list, &["A", "B", "C", "D", "E", "F", "G"])
        .and_then(|_| random_walk_removal(&mut list, removals));
    if let Err(err) = outcome {
        println!("Experiment ended early because {}", err);
    }
    println!();
}

fn expt_remove_random_backward<L: SimpleList<String> + Default>() -> Result<(), CursorError> {
    println!("Experiment 5: Remove random elements, moving backward.");
    let mut list = L::default();
    add_silently(&mut list, &["A", "B", "C", "D", "E", "F", "G"])?;
    let mut rng = rand::thread_rng();
    remove_backward(&mut list, move |_| rng.gen_range(0..2) == 0)?;
    println!();
    Ok(())
}

fn expt_remove_alternating_backward<L: SimpleList<String> + Default>() -> Result<(), CursorError> {
    println!("Experiment 6: Remove alternating elements, moving backward.");
    let mut list = L::default();
    add_silently(&mut list, &["A", "B", "C", "D", "E", "F", "G"])?;
    let mut count = 0usize;
    remove_backward(&mut list, |_| {
        let hit = count % 2 == 0;
        count += 1;
        hit
    })?;
    println!();
    Ok(())
}

/// Try to add elements through two cursors created at the same time. The
/// second add must fail if the list fails fast.
fn expt_fail_fast<L: SimpleList<String> + Default>() {
    println!("Experiment 7: Fail fast test.");
    let mut list = L::default();
    let mut cursor1 = list.list_cursor();
    let mut cursor2 = list.list_cursor();

    println!("Adding first element using cursor 1...");
    if let Err(err) = cursor1.add(&mut list, "should work".to_string()) {
        println!("Unexpected failure: {}", err);
        return;
    }
    print_list(&list);

    println!("Adding second element using cursor 2...");
    match cursor2.add(&mut list, "should NOT work".to_string()) {
        Err(CursorError::StaleCursor) => {
            println!("List fails fast.");
            println!("{}", CursorError::StaleCursor);
        }
        Err(err) => {
            println!("List does not fail fast.");
            println!("{}", err);
        }
        Ok(()) => {
            print_list(&list);
            println!("List does not fail fast.");
        }
    }
    println!();
}
