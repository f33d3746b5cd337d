use std::sync::Arc;

use tracing::{info, warn};

use crate::api::{ApiClient, Resource};
use crate::config::Config;
use crate::core::completeness::{visible_chips, Chip};
use crate::error::{AdminError, AdminResult, FALLBACK_ERROR_MESSAGE};
use crate::forms::{
    AnnouncementForm, CardErrorForm, ChangelogEntryForm, CultureQuestionForm, EditForm,
    FeedbackResponseForm, NewsForm, WordEntryForm,
};
use crate::modal::{FormModal, SubmitStep};
use crate::models::{
    Announcement, CardErrorReport, ChangelogItem, CultureQuestion, Feedback, NewsItem,
    VocabularyCard,
};
use crate::notify::{LogNotifier, Notifier};
use crate::stores::{ChangelogStore, FeedbackStore, ResourceStore};

/// One signed-in dashboard: the API client, the toast sink and one store
/// per resource. Stores are only changed through this session's `&mut self`
/// methods.
pub struct AdminSession {
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
    changelog: ChangelogStore,
    feedback: FeedbackStore,
    cards: ResourceStore<VocabularyCard>,
    card_errors: ResourceStore<CardErrorReport>,
    announcements: ResourceStore<Announcement>,
    news: ResourceStore<NewsItem>,
    culture: ResourceStore<CultureQuestion>,
}

impl AdminSession {
    pub fn new(config: &Config) -> AdminResult<Self> {
        Self::with_notifier(config, Arc::new(LogNotifier))
    }

    pub fn with_notifier(config: &Config, notifier: Arc<dyn Notifier>) -> AdminResult<Self> {
        Ok(Self {
            client: ApiClient::new(config)?,
            notifier,
            changelog: ChangelogStore::new(config.changelog_page_size),
            feedback: FeedbackStore::default(),
            cards: ResourceStore::default(),
            card_errors: ResourceStore::default(),
            announcements: ResourceStore::default(),
            news: ResourceStore::default(),
            culture: ResourceStore::default(),
        })
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn changelog(&self) -> &ChangelogStore {
        &self.changelog
    }

    pub fn changelog_mut(&mut self) -> &mut ChangelogStore {
        &mut self.changelog
    }

    pub fn feedback(&self) -> &FeedbackStore {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut FeedbackStore {
        &mut self.feedback
    }

    pub fn cards(&self) -> &ResourceStore<VocabularyCard> {
        &self.cards
    }

    pub fn cards_mut(&mut self) -> &mut ResourceStore<VocabularyCard> {
        &mut self.cards
    }

    pub fn card_errors(&self) -> &ResourceStore<CardErrorReport> {
        &self.card_errors
    }

    pub fn card_errors_mut(&mut self) -> &mut ResourceStore<CardErrorReport> {
        &mut self.card_errors
    }

    pub fn announcements(&self) -> &ResourceStore<Announcement> {
        &self.announcements
    }

    pub fn announcements_mut(&mut self) -> &mut ResourceStore<Announcement> {
        &mut self.announcements
    }

    pub fn news(&self) -> &ResourceStore<NewsItem> {
        &self.news
    }

    pub fn news_mut(&mut self) -> &mut ResourceStore<NewsItem> {
        &mut self.news
    }

    pub fn culture(&self) -> &ResourceStore<CultureQuestion> {
        &self.culture
    }

    pub fn culture_mut(&mut self) -> &mut ResourceStore<CultureQuestion> {
        &mut self.culture
    }

    fn toast_error(&self, err: &AdminError) {
        self.notifier.error(&err.toast_message(FALLBACK_ERROR_MESSAGE));
    }

    /// Loads the changelog unless it is already in memory. Filter and page
    /// changes never go back to the network.
    pub async fn ensure_changelog(&mut self) -> AdminResult<()> {
        if self.changelog.is_loaded() {
            return Ok(());
        }
        let result = self.changelog.fetch(&self.client).await;
        if let Err(err) = &result {
            self.toast_error(err);
        }
        result
    }

    pub async fn refresh_feedback(&mut self) -> AdminResult<()> {
        let result = self.feedback.fetch(&self.client).await;
        if let Err(err) = &result {
            self.toast_error(err);
        }
        result
    }

    pub async fn refresh_cards(&mut self) -> AdminResult<()> {
        let result = self.cards.fetch(&self.client).await;
        if let Err(err) = &result {
            self.toast_error(err);
        }
        result
    }

    /// Dashboard landing: fetch every list concurrently. Each failure is
    /// toasted; the first one is returned.
    pub async fn refresh_all(&mut self) -> AdminResult<()> {
        let client = &self.client;
        let (changelog, feedback, cards, card_errors, announcements, news, culture) = futures::join!(
            self.changelog.fetch(client),
            self.feedback.fetch(client),
            self.cards.fetch(client),
            self.card_errors.fetch(client),
            self.announcements.fetch(client),
            self.news.fetch(client),
            self.culture.fetch(client),
        );

        let mut first_error = None;
        for result in [changelog, feedback, cards, card_errors, announcements, news, culture] {
            if let Err(err) = result {
                self.toast_error(&err);
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Chips for every loaded card row, keyed by card id.
    pub fn card_chips(&self) -> Vec<(&str, Vec<Chip>)> {
        self.cards
            .items()
            .iter()
            .map(|card| (card.id.as_str(), visible_chips(card)))
            .collect()
    }

    pub fn open_feedback_response(&self, id: &str) -> Option<FormModal<FeedbackResponseForm>> {
        self.feedback
            .get(id)
            .map(|fb| FormModal::open_edit(&fb.id, FeedbackResponseForm::from(fb)))
    }

    pub fn open_word_entry(&self, id: &str) -> Option<FormModal<WordEntryForm>> {
        self.cards
            .get(id)
            .map(|card| FormModal::open_edit(&card.id, WordEntryForm::from(card)))
    }

    pub fn open_card_error(&self, id: &str) -> Option<FormModal<CardErrorForm>> {
        self.card_errors
            .get(id)
            .map(|report| FormModal::open_edit(&report.id, CardErrorForm::from(report)))
    }

    pub fn open_changelog_entry(&self, id: &str) -> Option<FormModal<ChangelogEntryForm>> {
        self.changelog
            .all_items()
            .iter()
            .find(|item| item.id == id)
            .map(|item| FormModal::open_edit(&item.id, ChangelogEntryForm::from(item)))
    }

    pub fn open_announcement(&self, id: &str) -> Option<FormModal<AnnouncementForm>> {
        self.announcements
            .get(id)
            .map(|item| FormModal::open_edit(&item.id, AnnouncementForm::from(item)))
    }

    pub fn open_news(&self, id: &str) -> Option<FormModal<NewsForm>> {
        self.news
            .get(id)
            .map(|item| FormModal::open_edit(&item.id, NewsForm::from(item)))
    }

    pub fn open_culture_question(&self, id: &str) -> Option<FormModal<CultureQuestionForm>> {
        self.culture
            .get(id)
            .map(|item| FormModal::open_edit(&item.id, CultureQuestionForm::from(item)))
    }

    pub async fn submit_feedback_response(
        &mut self,
        modal: &mut FormModal<FeedbackResponseForm>,
    ) -> AdminResult<Option<Feedback>> {
        let saved = run_submit::<_, Feedback>(&self.client, &*self.notifier, modal).await?;
        if let Some(feedback) = &saved {
            self.feedback.apply_update(feedback.clone());
        }
        Ok(saved)
    }

    pub async fn submit_word_entry(
        &mut self,
        modal: &mut FormModal<WordEntryForm>,
    ) -> AdminResult<Option<VocabularyCard>> {
        let saved = run_submit::<_, VocabularyCard>(&self.client, &*self.notifier, modal).await?;
        if let Some(card) = &saved {
            self.cards.upsert(card.clone());
        }
        Ok(saved)
    }

    pub async fn submit_card_error(
        &mut self,
        modal: &mut FormModal<CardErrorForm>,
    ) -> AdminResult<Option<CardErrorReport>> {
        let saved = run_submit::<_, CardErrorReport>(&self.client, &*self.notifier, modal).await?;
        if let Some(report) = &saved {
            self.card_errors.upsert(report.clone());
        }
        Ok(saved)
    }

    pub async fn submit_announcement(
        &mut self,
        modal: &mut FormModal<AnnouncementForm>,
    ) -> AdminResult<Option<Announcement>> {
        let saved = run_submit::<_, Announcement>(&self.client, &*self.notifier, modal).await?;
        if let Some(item) = &saved {
            self.announcements.upsert(item.clone());
        }
        Ok(saved)
    }

    pub async fn submit_news(
        &mut self,
        modal: &mut FormModal<NewsForm>,
    ) -> AdminResult<Option<NewsItem>> {
        let saved = run_submit::<_, NewsItem>(&self.client, &*self.notifier, modal).await?;
        if let Some(item) = &saved {
            self.news.upsert(item.clone());
        }
        Ok(saved)
    }

    pub async fn submit_culture_question(
        &mut self,
        modal: &mut FormModal<CultureQuestionForm>,
    ) -> AdminResult<Option<CultureQuestion>> {
        let saved = run_submit::<_, CultureQuestion>(&self.client, &*self.notifier, modal).await?;
        if let Some(item) = &saved {
            self.culture.upsert(item.clone());
        }
        Ok(saved)
    }

    pub async fn submit_changelog_entry(
        &mut self,
        modal: &mut FormModal<ChangelogEntryForm>,
    ) -> AdminResult<Option<ChangelogItem>> {
        let created = modal.is_create();
        let saved = run_submit::<_, ChangelogItem>(&self.client, &*self.notifier, modal).await?;
        if let Some(item) = &saved {
            if created {
                self.changelog.insert(item.clone());
            } else {
                self.changelog.apply_update(item.clone());
            }
        }
        Ok(saved)
    }

    pub async fn delete_feedback(&mut self, id: &str) -> AdminResult<()> {
        let result = self.client.remove::<Feedback>(id).await;
        self.report_delete::<Feedback>(&result);
        result?;
        self.feedback.remove(id);
        Ok(())
    }

    pub async fn delete_changelog_entry(&mut self, id: &str) -> AdminResult<()> {
        let result = self.client.remove::<ChangelogItem>(id).await;
        self.report_delete::<ChangelogItem>(&result);
        result?;
        self.changelog.remove(id);
        Ok(())
    }

    pub async fn delete_announcement(&mut self, id: &str) -> AdminResult<()> {
        let result = self.announcements.delete(&self.client, id).await;
        self.report_delete::<Announcement>(&result);
        result
    }

    pub async fn delete_news(&mut self, id: &str) -> AdminResult<()> {
        let result = self.news.delete(&self.client, id).await;
        self.report_delete::<NewsItem>(&result);
        result
    }

    pub async fn delete_culture_question(&mut self, id: &str) -> AdminResult<()> {
        let result = self.culture.delete(&self.client, id).await;
        self.report_delete::<CultureQuestion>(&result);
        result
    }

    fn report_delete<R: Resource>(&self, result: &AdminResult<()>) {
        match result {
            Ok(()) => self.notifier.success(&format!("{} deleted", capitalize(R::LABEL))),
            Err(err) => self.toast_error(err),
        }
    }

    /// Drops all loaded state, e.g. on sign-out.
    pub fn reset(&mut self) {
        self.changelog.reset();
        self.feedback.reset();
        self.cards.reset();
        self.card_errors.reset();
        self.announcements.reset();
        self.news.reset();
        self.culture.reset();
        info!("session state cleared");
    }
}

/// Drives one submit of `modal` against the backend. `Ok(None)` means the
/// dialog had nothing to send and was closed. Validation failures are shown
/// inline on the form, so they return an error without a toast.
async fn run_submit<F, R>(
    client: &ApiClient,
    notifier: &dyn Notifier,
    modal: &mut FormModal<F>,
) -> AdminResult<Option<R>>
where
    F: EditForm,
    R: Resource,
{
    let step = modal.begin_submit()?;
    let (result, verb) = match step {
        SubmitStep::NoOp => return Ok(None),
        SubmitStep::Create(body) => (client.create::<R, _>(&body).await, "created"),
        SubmitStep::Update { id, patch } => (client.update::<R>(&id, &patch).await, "updated"),
    };

    match result {
        Ok(record) => {
            modal.finish_submit(Ok(()), notifier, &format!("{} {verb}", capitalize(R::LABEL)));
            Ok(Some(record))
        }
        Err(err) => {
            warn!(resource = R::LABEL, error = %err, "submit failed");
            modal.finish_submit(Err(&err), notifier, "");
            Err(err)
        }
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
