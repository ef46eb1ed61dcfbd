//! Read-only projections of [`AppState`].

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::app::actions::AppStore;
use crate::app::catalog::{Channel, Os};
use crate::app::state::AppState;
use crate::store::Derived;

/// The subset of state that would be mirrored to a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServerParams {
    pub os: Os,
    pub channel: Channel,
}

impl ServerParams {
    pub fn pairs(&self) -> [(&'static str, &'static str); 2] {
        [("os", self.os.as_str()), ("channel", self.channel.as_str())]
    }

    pub fn query_string(&self) -> String {
        query_string(self.pairs())
    }
}

pub fn server_params(state: &AppState) -> ServerParams {
    ServerParams {
        os: state.os,
        channel: state.channel,
    }
}

/// Join `key=value` pairs with `&`, keys in ascending order.
///
/// Values are written as-is; a repeated key keeps its last value.
pub fn query_string<I, K, V>(params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: fmt::Display,
{
    let sorted: BTreeMap<String, String> = params
        .into_iter()
        .map(|(key, value)| (key.as_ref().to_string(), value.to_string()))
        .collect();

    sorted
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&")
}

/// Derived view over [`server_params`].
pub fn server_params_view(store: &AppStore) -> Derived<ServerParams> {
    store.derive(server_params)
}

/// Derived view over the query string of the current server params.
pub fn query_view(store: &AppStore) -> Derived<String> {
    store.derive(|state: &AppState| server_params(state).query_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::actions::{add_random_number, change_channel, change_os};
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn query_string_sorts_keys() {
        assert_eq!(
            query_string([("os", "mac"), ("channel", "beta")]),
            "channel=beta&os=mac"
        );
        assert_eq!(query_string(Vec::<(&str, u32)>::new()), "");
        assert_eq!(query_string([("b", 2), ("a", 1), ("c", 3)]), "a=1&b=2&c=3");
    }

    #[test]
    fn server_params_ignore_numbers() {
        let state = AppState {
            channel: Channel::Nightly,
            os: Os::Linux,
            ..AppState::default()
        };
        let params = server_params(&state);
        assert_eq!(
            params,
            ServerParams {
                os: Os::Linux,
                channel: Channel::Nightly
            }
        );
        assert_eq!(params.query_string(), "channel=nightly&os=linux");
    }

    #[test]
    fn server_params_view_tracks_options() {
        let store = AppStore::new(AppState::default());
        let view = server_params_view(&store);
        let before = view.get();

        store.dispatch(add_random_number()).unwrap();
        assert!(Arc::ptr_eq(&before, &view.get()));

        store.dispatch(change_os(Os::Mac)).unwrap();
        assert_eq!(
            *view.get(),
            ServerParams {
                os: Os::Mac,
                channel: Channel::Release
            }
        );
    }

    #[test]
    fn query_view_fires_only_for_option_changes() {
        let store = AppStore::new(AppState::default());
        let view = query_view(&store);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = view.subscribe(move |query| sink.lock().push(query.to_string()));

        store.dispatch(add_random_number()).unwrap();
        store.dispatch(change_channel(Channel::Beta)).unwrap();
        store.dispatch(add_random_number()).unwrap();
        store.dispatch(change_os(Os::Mac)).unwrap();

        assert_eq!(
            *seen.lock(),
            vec![
                "channel=release&os=windows".to_string(),
                "channel=beta&os=windows".to_string(),
                "channel=beta&os=mac".to_string(),
            ]
        );
    }
}
