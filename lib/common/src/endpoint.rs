use url::Url;

/// The address of a SPARQL endpoint together with the parameters sent with every request.
///
/// Parameters found in the query string of the endpoint URL are split off and kept individually,
/// so that `http://example.org/sparql?infer=false` queries `http://example.org/sparql` with
/// `infer=false` added to each request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SparqlEndpoint {
    url: Url,
    parameters: Vec<(String, String)>,
    user_agent: Option<String>,
}

impl SparqlEndpoint {
    /// Parses an endpoint URL and extracts its query parameters.
    pub fn parse(endpoint: &str) -> Result<Self, url::ParseError> {
        let mut url = Url::parse(endpoint)?;
        let parameters = url
            .query_pairs()
            .map(|(name, value)| (name.into_owned(), value.into_owned()))
            .collect();
        url.set_query(None);
        Ok(Self {
            url,
            parameters,
            user_agent: None,
        })
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Adds a parameter that is forwarded with every request.
    pub fn add_parameter(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parameters.push((name.into(), value.into()));
    }

    /// The endpoint URL without its query string.
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn parameters(&self) -> &[(String, String)] {
        &self.parameters
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }
}
