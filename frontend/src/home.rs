use shared::models::{Team, VoteSnapshot};
use yew::prelude::*;

use crate::api;
use crate::certificate;
use crate::channel::{self, ChannelEvent, ChannelHandle};
use crate::config::CONFIG;
use crate::styles::*;

pub fn team_label(team: Team) -> &'static str {
    match team {
        Team::Pradhan => "Team Pradhan 🥒",
        Team::Banrakas => "Team Banrakas 🍳",
    }
}

#[derive(Clone, PartialEq)]
enum Notice {
    Success(String),
    Error(String),
}

pub struct Home {
    snapshot: VoteSnapshot,
    notice: Option<Notice>,
    submitting: bool,
    voted_team: Option<Team>,
    show_modal: bool,
    channel: Option<ChannelHandle>,
}

pub enum Msg {
    Channel(ChannelEvent),
    SnapshotLoaded(VoteSnapshot),
    LoadFailed(String),
    Vote(Team),
    VoteAccepted(Team, VoteSnapshot),
    VoteRejected(String),
    DownloadCertificate,
    CloseModal,
}

impl Home {
    /// Degraded path: one-shot snapshot poll with bounded retries.
    fn poll(ctx: &Context<Self>) {
        ctx.link().send_future(async {
            match api::fetch_snapshot_with_retries().await {
                Ok(snapshot) => Msg::SnapshotLoaded(snapshot),
                Err(error) => Msg::LoadFailed(error),
            }
        });
    }

    fn degrade(&mut self, ctx: &Context<Self>) {
        if let Some(channel) = &mut self.channel {
            channel.close();
        }
        self.channel = None;
        self.notice = Some(Notice::Error(
            "Real-time updates unavailable. Using fallback.".into(),
        ));
        Self::poll(ctx);
    }
}

impl Component for Home {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let channel = CONFIG.channel().and_then(|(key, cluster)| {
            channel::connect(key, cluster, ctx.link().callback(Msg::Channel)).ok()
        });

        let mut home = Self {
            snapshot: VoteSnapshot::default(),
            notice: None,
            submitting: false,
            voted_team: None,
            show_modal: false,
            channel,
        };

        if home.channel.is_none() {
            home.degrade(ctx);
        }

        home
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Channel(ChannelEvent::Subscribed) => {
                // The channel does not replay; fetch the starting snapshot.
                Self::poll(ctx);
                false
            }
            Msg::Channel(ChannelEvent::Update(snapshot)) => {
                // Last write wins; no ordering across broadcasts.
                self.snapshot = snapshot;
                true
            }
            Msg::Channel(ChannelEvent::Error(_)) | Msg::Channel(ChannelEvent::Closed) => {
                self.degrade(ctx);
                true
            }
            Msg::SnapshotLoaded(snapshot) => {
                self.snapshot = snapshot;
                true
            }
            Msg::LoadFailed(_) => {
                // Keep whatever snapshot is already on screen.
                self.notice = Some(Notice::Error("Failed to load votes after retries.".into()));
                true
            }
            Msg::Vote(team) => {
                self.submitting = true;
                self.notice = None;
                ctx.link().send_future(async move {
                    match api::submit_vote(team).await {
                        Ok(snapshot) => Msg::VoteAccepted(team, snapshot),
                        Err(error) => Msg::VoteRejected(error),
                    }
                });
                true
            }
            Msg::VoteAccepted(team, snapshot) => {
                self.submitting = false;
                self.snapshot = snapshot;
                self.voted_team = Some(team);
                self.show_modal = true;
                self.notice = Some(Notice::Success("Vote submitted successfully!".into()));
                true
            }
            Msg::VoteRejected(error) => {
                self.submitting = false;
                let message = if error.is_empty() {
                    "Failed to submit vote. Please try again.".to_string()
                } else {
                    error
                };
                self.notice = Some(Notice::Error(message));
                true
            }
            Msg::DownloadCertificate => {
                let Some(team) = self.voted_team else {
                    return false;
                };
                self.notice = Some(match certificate::download(team) {
                    Ok(()) => Notice::Success("Certificate downloaded!".into()),
                    Err(_) => Notice::Error("Failed to generate certificate.".into()),
                });
                true
            }
            Msg::CloseModal => {
                self.show_modal = false;
                self.voted_team = None;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let vote = |team: Team| ctx.link().callback(move |_| Msg::Vote(team));

        html! {
            <main class={PAGE}>
                <h1 class={HEADING}>{"Vote for Panchayat S4!"}</h1>

                {self.render_notice()}

                <div class="mb-12 w-full max-w-3xl">
                    <h2 class="text-2xl font-bold text-gray-800 mb-4 text-center">{"Current Results"}</h2>
                    <div class={RESULTS_CARD}>
                        <div class={combine_classes(RESULT_COLUMN, "text-left")}>
                            <span>{team_label(Team::Pradhan)}</span>
                            <div class="mt-1">{self.snapshot.pradhan}</div>
                        </div>
                        <div class={combine_classes(RESULT_COLUMN, "text-center")}>
                            <span>{"Total Votes"}</span>
                            <div class="mt-1">{self.snapshot.total()}</div>
                        </div>
                        <div class={combine_classes(RESULT_COLUMN, "text-right")}>
                            <span>{team_label(Team::Banrakas)}</span>
                            <div class="mt-1">{self.snapshot.banrakas}</div>
                        </div>
                    </div>
                </div>

                <div class="flex flex-col sm:flex-row space-y-4 sm:space-y-0 sm:space-x-6">
                    <button
                        onclick={vote(Team::Pradhan)}
                        disabled={self.submitting}
                        class={combine_classes(VOTE_BUTTON_BASE, VOTE_BUTTON_PRADHAN)}>
                        {if self.submitting { "..." } else { team_label(Team::Pradhan) }}
                    </button>
                    <button
                        onclick={vote(Team::Banrakas)}
                        disabled={self.submitting}
                        class={combine_classes(VOTE_BUTTON_BASE, VOTE_BUTTON_BANRAKAS)}>
                        {if self.submitting { "..." } else { team_label(Team::Banrakas) }}
                    </button>
                </div>

                {self.render_modal(ctx)}
            </main>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let Some(channel) = &mut self.channel {
            channel.close();
        }
    }
}

impl Home {
    fn render_notice(&self) -> Html {
        match &self.notice {
            Some(Notice::Success(text)) => html! {
                <div class={alert_style(true)}>{text}</div>
            },
            Some(Notice::Error(text)) => html! {
                <div class={alert_style(false)}>{text}</div>
            },
            None => html! {},
        }
    }

    fn render_modal(&self, ctx: &Context<Self>) -> Html {
        let Some(team) = self.voted_team else {
            return html! {};
        };
        if !self.show_modal {
            return html! {};
        }

        html! {
            <div class={MODAL_BACKDROP}>
                <div class={MODAL_CARD}>
                    <h2 class="text-3xl font-bold text-gray-800 mt-4">{"Vote Confirmed!"}</h2>
                    <p class="text-lg mt-2 text-gray-600">
                        {"You voted for "}
                        <strong class={if team == Team::Pradhan { "text-green-600" } else { "text-red-600" }}>
                            {team_label(team)}
                        </strong>
                    </p>
                    <p class="text-sm text-gray-500 mt-2">{"#PanchayatSeason4 #PrimeVideo"}</p>
                    <div class="mt-8 flex flex-col sm:flex-row justify-center space-y-4 sm:space-y-0 sm:space-x-4">
                        <button
                            onclick={ctx.link().callback(|_| Msg::DownloadCertificate)}
                            class={MODAL_BUTTON_PRIMARY}>
                            {"Share Certificate 📸"}
                        </button>
                        <button
                            onclick={ctx.link().callback(|_| Msg::CloseModal)}
                            class={MODAL_BUTTON_SECONDARY}>
                            {"Vote Again"}
                        </button>
                    </div>
                </div>
            </div>
        }
    }
}
