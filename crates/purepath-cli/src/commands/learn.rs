use clap::Subcommand;
use purepath_core::content::{ContentGraph, Navigator, TopicNode};
use serde::Serialize;

use super::{print_json, read_line, CmdResult};

#[derive(Subcommand)]
pub enum LearnAction {
    /// Interactive browser (numbers drill in, `b` goes back, `/text` searches, `q` quits)
    Browse,
    /// Print one topic with its next steps and related concepts
    Show {
        /// Topic id; unknown ids show the root
        id: String,
    },
    /// Search topic titles and summaries
    Search {
        query: String,
    },
    /// Report dangling edges, cycles and unreachable topics
    Validate,
}

#[derive(Serialize)]
struct TopicRef<'a> {
    id: &'a str,
    title: &'a str,
    category: &'a str,
}

impl<'a> From<&'a TopicNode> for TopicRef<'a> {
    fn from(node: &'a TopicNode) -> Self {
        Self {
            id: &node.id,
            title: &node.title,
            category: node.category.as_str(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TopicView<'a> {
    #[serde(flatten)]
    topic: &'a TopicNode,
    next_steps: Vec<TopicRef<'a>>,
    related: Vec<TopicRef<'a>>,
}

fn refs(nodes: Vec<&TopicNode>) -> Vec<TopicRef<'_>> {
    nodes.into_iter().map(TopicRef::from).collect()
}

pub fn run(action: LearnAction) -> CmdResult {
    let graph = ContentGraph::builtin();

    match action {
        LearnAction::Browse => browse(&graph)?,
        LearnAction::Show { id } => {
            let topic = graph.resolve(&id);
            let view = TopicView {
                topic,
                next_steps: refs(graph.children_of(topic)),
                related: refs(graph.related_of(topic)),
            };
            print_json(&view)?;
        }
        LearnAction::Search { query } => {
            print_json(&refs(graph.search(&query)))?;
        }
        LearnAction::Validate => {
            print_json(&graph.validate())?;
        }
    }
    Ok(())
}

fn render_topic(nav: &Navigator<'_>) {
    let topic = nav.current();
    println!();
    println!("== {} [{}] ==", topic.title, topic.category);
    println!("{}", topic.summary);
    println!();
    println!("{}", topic.content.trim());
    println!();

    let next = nav.next_steps();
    if next.is_empty() {
        println!("No next steps.");
    } else {
        println!("Next steps:");
        for (i, node) in next.iter().enumerate() {
            println!("  {}. {}", i + 1, node.title);
        }
    }

    let related = nav.related();
    if related.is_empty() {
        println!("No related concepts.");
    } else {
        println!("Related:");
        for (i, node) in related.iter().enumerate() {
            println!("  r{}. {}", i + 1, node.title);
        }
    }
}

fn render_results(nav: &Navigator<'_>) {
    let results = nav.results();
    println!();
    if results.is_empty() {
        println!("No topics match \"{}\".", nav.search_query());
        return;
    }
    println!("Results for \"{}\":", nav.search_query());
    for (i, node) in results.iter().enumerate() {
        println!("  {}. {} - {}", i + 1, node.title, node.summary);
    }
}

/// 1-based menu choice to a 0-based index.
fn parse_choice(input: &str) -> Option<usize> {
    input.parse::<usize>().ok()?.checked_sub(1)
}

/// What the browser should do after one line of input.
#[derive(Debug, PartialEq, Eq)]
enum Step {
    Quit,
    Topic,
    Results,
    Nothing,
    Hint(&'static str),
    Unknown,
}

/// Apply one line of browser input to the navigator.
fn handle(nav: &mut Navigator<'_>, line: &str) -> Step {
    let input = line.trim();
    match input {
        "" => Step::Nothing,
        "q" | "quit" => Step::Quit,
        "b" | "back" => {
            if nav.is_searching() {
                nav.clear_search();
            } else {
                nav.back();
            }
            Step::Topic
        }
        _ if input.starts_with('/') => {
            // The query is taken verbatim; only `/` on its own stops searching.
            let query = line.trim_start().strip_prefix('/').unwrap_or_default();
            nav.search(query);
            if nav.is_searching() {
                Step::Results
            } else {
                Step::Topic
            }
        }
        _ if nav.is_searching() => {
            match parse_choice(input).and_then(|i| nav.select_result(i)) {
                Some(_) => Step::Topic,
                None => Step::Hint("pick a result number, `b` or `/` to stop searching"),
            }
        }
        _ => {
            let target = match input.strip_prefix('r') {
                Some(rest) => parse_choice(rest).and_then(|i| nav.related().get(i).copied()),
                None => parse_choice(input).and_then(|i| nav.next_steps().get(i).copied()),
            };
            match target {
                Some(node) => {
                    nav.drill_into(&node.id);
                    Step::Topic
                }
                None => Step::Unknown,
            }
        }
    }
}

fn browse(graph: &ContentGraph) -> CmdResult {
    let mut nav = Navigator::new(graph);
    render_topic(&nav);

    while let Some(line) = read_line("\nlearn> ")? {
        match handle(&mut nav, &line) {
            Step::Quit => break,
            Step::Topic => render_topic(&nav),
            Step::Results => render_results(&nav),
            Step::Nothing => {}
            Step::Hint(hint) => eprintln!("{hint}"),
            Step::Unknown => eprintln!("unknown choice: {}", line.trim()),
        }
    }
    Ok(())
}
