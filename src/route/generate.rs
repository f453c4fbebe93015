use hashbrown::HashSet as FastHashSet;

use super::query::{append_query, encode_path_segment};
use super::{GenerateError, GenerateResult, Route};
use crate::model::RouteModel;
use crate::pattern::Segment;
use crate::types::RouteParams;

/// What a URL is generated from.
#[derive(Clone, Copy)]
pub enum GenerateArgs<'a> {
    Params(&'a RouteParams),
    Model(&'a dyn RouteModel),
}

impl<'a> GenerateArgs<'a> {
    pub fn model<M: RouteModel>(model: &'a M) -> Self {
        GenerateArgs::Model(model)
    }
}

impl<'a> From<&'a RouteParams> for GenerateArgs<'a> {
    fn from(params: &'a RouteParams) -> Self {
        GenerateArgs::Params(params)
    }
}

impl<'a> From<&'a dyn RouteModel> for GenerateArgs<'a> {
    fn from(model: &'a dyn RouteModel) -> Self {
        GenerateArgs::Model(model)
    }
}

impl Route {
    /// Reverses the route's path into a URL.
    ///
    /// A mapping supplies each placeholder by key before `fallback` is
    /// consulted, and keys that fill no placeholder become the query string.
    /// A model supplies `id` through [`RouteModel::to_param`] and every other
    /// placeholder through [`RouteModel::field`].
    #[tracing::instrument(level = "trace", skip(self, args, fallback), fields(route = %self.label()))]
    pub fn generate<'a>(
        &self,
        args: impl Into<GenerateArgs<'a>>,
        fallback: &RouteParams,
    ) -> GenerateResult<String> {
        if self.regexp {
            return Err(GenerateError::RegexpRoute {
                route: self.label(),
            });
        }

        let segments = self
            .segments
            .as_ref()
            .ok_or_else(|| GenerateError::NoPathSegments {
                route: self.label(),
            })?;

        let args = args.into();
        let mut consumed: FastHashSet<&str> = FastHashSet::new();
        let mut url = String::new();

        for segment in segments {
            match segment {
                Segment::Literal(text) => url.push_str(text),
                Segment::Anonymous => {
                    return Err(GenerateError::UnsupportedSegment {
                        route: self.label(),
                    });
                }
                Segment::Placeholder(name) => {
                    let value = match args {
                        GenerateArgs::Params(params) => {
                            consumed.insert(name.as_str());
                            params.get(name).cloned()
                        }
                        GenerateArgs::Model(model) if name == "id" => {
                            model.to_param().or_else(|| model.field(name))
                        }
                        GenerateArgs::Model(model) => model.field(name),
                    }
                    .or_else(|| fallback.get(name).cloned())
                    .ok_or_else(|| GenerateError::MissingParameter {
                        route: self.label(),
                        param: name.clone(),
                    })?;
                    url.push_str(&encode_path_segment(&value));
                }
            }
        }

        if let GenerateArgs::Params(params) = args {
            let skip: Vec<&str> = consumed.into_iter().collect();
            append_query(&mut url, params, &skip);
        }

        Ok(url)
    }

    /// Whether every literal param of the route agrees with `params` and every
    /// placeholder of its path can be filled from `params` or `fallback`.
    pub(crate) fn is_consistent_with(&self, params: &RouteParams, fallback: &RouteParams) -> bool {
        if self.regexp || self.deferred.is_some() {
            return false;
        }
        let Some(segments) = &self.segments else {
            return false;
        };

        let literals_agree = self.params.iter().all(|(key, template)| {
            match (template.as_literal(), params.get(key)) {
                (Some(literal), Some(given)) => literal == given,
                _ => true,
            }
        });

        let routing_keys_known = ["controller", "action"].iter().all(|key| {
            !params.contains_key(*key) || self.params.iter().any(|(name, _)| name == *key)
        });

        let placeholders_filled = segments.iter().all(|segment| match segment {
            Segment::Literal(_) => true,
            Segment::Anonymous => false,
            Segment::Placeholder(name) => {
                params.contains_key(name) || fallback.contains_key(name)
            }
        });

        literals_agree && routing_keys_known && placeholders_filled
    }

    /// Literal params of the route that `params` repeats verbatim.
    pub(crate) fn literal_param_keys(&self, params: &RouteParams) -> Vec<String> {
        self.params
            .iter()
            .filter(|(key, template)| {
                template.as_literal().is_some_and(|literal| {
                    params.get(key).is_some_and(|given| given == literal)
                })
            })
            .map(|(key, _)| key.clone())
            .collect()
    }
}
