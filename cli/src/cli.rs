use clap::{Args as ClapArgs, Parser, Subcommand, ValueHint};

#[derive(Parser)]
#[command(about, version, name = "sparql-slurper")]
/// Matches triple patterns against a SPARQL endpoint through an on-demand local cache
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch the triples matching one or more patterns and write them to stdout
    Match {
        #[command(flatten)]
        endpoint: EndpointArgs,
        /// Subject of the pattern, in N-Triples syntax
        ///
        /// Omitted, empty or `?var` means any subject.
        #[arg(short, long)]
        subject: Option<String>,
        /// Predicate of the pattern, in N-Triples syntax
        #[arg(short, long)]
        predicate: Option<String>,
        /// Object of the pattern, in N-Triples syntax
        #[arg(short, long)]
        object: Option<String>,
        /// Also fetch everything about the objects of the matched triples
        #[arg(long)]
        follow: bool,
        /// The output format
        ///
        /// It can be an extension like "ttl" or a MIME type like "text/turtle".
        #[arg(short, long, default_value = "nt")]
        format: String,
        /// Namespace binding used when writing the output, as `prefix=namespace`
        #[arg(long = "prefix", value_parser = parse_key_value)]
        prefixes: Vec<(String, String)>,
        /// Print the triples of every executed query to stderr
        #[arg(long)]
        print_results: bool,
        /// Print query statistics to stderr once done
        #[arg(long)]
        stats: bool,
    },
}

/// Options that configure the connection to the endpoint.
#[derive(ClapArgs)]
pub struct EndpointArgs {
    /// URL of the SPARQL endpoint
    ///
    /// Query string parameters are sent with every query.
    #[arg(value_hint = ValueHint::Url)]
    pub endpoint: String,
    /// Only match triples in the given named graph
    #[arg(long, conflicts_with = "any_graph", value_hint = ValueHint::Url)]
    pub graph: Option<String>,
    /// Match triples in any named graph
    #[arg(long, conflicts_with = "graph")]
    pub any_graph: bool,
    /// Use the GraphDB entity identifiers to give blank nodes stable names
    #[arg(long)]
    pub graphdb: bool,
    /// Trust the endpoint to keep blank node labels stable between queries
    #[arg(long)]
    pub persistent_bnodes: bool,
    /// User agent sent with every request
    #[arg(long)]
    pub user_agent: Option<String>,
    /// Extra request parameter, as `name=value`
    #[arg(long = "param", value_parser = parse_key_value)]
    pub parameters: Vec<(String, String)>,
    /// Log every executed query
    #[arg(long)]
    pub trace: bool,
}

fn parse_key_value(value: &str) -> Result<(String, String), String> {
    value
        .split_once('=')
        .map(|(key, value)| (key.to_owned(), value.to_owned()))
        .ok_or_else(|| format!("'{value}' is not of the form key=value"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_value_pairs() {
        assert_eq!(
            parse_key_value("infer=false"),
            Ok(("infer".to_owned(), "false".to_owned()))
        );
        assert_eq!(
            parse_key_value("a=b=c"),
            Ok(("a".to_owned(), "b=c".to_owned()))
        );
        assert!(parse_key_value("infer").is_err());
    }
}
