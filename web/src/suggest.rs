use flechita_protocol::SuggestRequest;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api::ApiClient;

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct SuggestProps {
    pub user_id: String,
    pub partner_user_id: String,
    pub on_send: Callback<String>,
}

pub(crate) enum Msg {
    UpdateDraft(String),
    RequestSuggestions,
    Suggested(Vec<String>),
    SuggestFailed(String),
    Pick(usize),
    Send,
}

/// Message input with a "smart reply" button: the current draft is sent to
/// the remote suggestion endpoint as conversation context and the returned
/// candidates are offered as one-tap chips.
pub(crate) struct SuggestBar {
    draft: String,
    suggestions: Vec<String>,
    fetching: bool,
}

impl Component for SuggestBar {
    type Message = Msg;
    type Properties = SuggestProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            draft: String::new(),
            suggestions: Vec::new(),
            fetching: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::UpdateDraft(draft) => {
                self.draft = draft;
                false
            }
            Msg::RequestSuggestions => {
                if self.fetching {
                    return false;
                }
                self.fetching = true;
                let request = SuggestRequest {
                    context: self.draft.clone(),
                    user_id: ctx.props().user_id.clone(),
                    partner_user_id: ctx.props().partner_user_id.clone(),
                };
                ctx.link().send_future(async move {
                    match ApiClient::suggest_reply(&request).await {
                        Ok(response) => Msg::Suggested(response.suggestions),
                        Err(err) => Msg::SuggestFailed(err.to_string()),
                    }
                });
                true
            }
            Msg::Suggested(suggestions) => {
                log::debug!("received {} suggestions", suggestions.len());
                self.fetching = false;
                self.suggestions = suggestions;
                true
            }
            Msg::SuggestFailed(reason) => {
                log::warn!("suggestion fetch failed: {}", reason);
                self.fetching = false;
                gloo::dialogs::alert("Could not fetch suggestions, please try again.");
                true
            }
            Msg::Pick(index) => {
                if let Some(picked) = self.suggestions.get(index) {
                    self.draft = picked.clone();
                    self.suggestions.clear();
                    true
                } else {
                    false
                }
            }
            Msg::Send => {
                if self.draft.is_empty() {
                    return false;
                }
                ctx.props().on_send.emit(core::mem::take(&mut self.draft));
                self.suggestions.clear();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let oninput = ctx.link().callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::UpdateDraft(input.value())
        });
        let cb_suggest = ctx.link().callback(|_| Msg::RequestSuggestions);
        let cb_send = ctx.link().callback(|_| Msg::Send);

        html! {
            <div class="suggest-bar">
                <ul class="chips">
                    {
                        for self.suggestions.iter().enumerate().map(|(index, suggestion)| {
                            let cb_pick = ctx.link().callback(move |_| Msg::Pick(index));
                            html! {
                                <li><button onclick={cb_pick}>{suggestion}</button></li>
                            }
                        })
                    }
                </ul>
                <input type="text" value={self.draft.clone()} {oninput} placeholder="Say something nice"/>
                <button onclick={cb_suggest} disabled={self.fetching}>{"✨"}</button>
                <button onclick={cb_send}>{"Send"}</button>
            </div>
        }
    }
}
