// file: src/catalog/rules.rs
//! Built-in advice, one list per behavioural cluster.

use crate::models::CatalogEntry;

/// Cluster 0: disciplined and healthy. Push deeper techniques, reinforce good habits.
pub fn disciplined() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::with_action(
            "Your balance between study and wellbeing is excellent. To go one step further, how about trying the Feynman technique on a hard topic? I'll block some time for it.",
            "Practice: Feynman Technique",
            1.0,
        ),
        CatalogEntry::with_action(
            "You keep great discipline. To avoid monotony, shall we schedule an 'active review' session where you explain the topics to yourself out loud?",
            "Active Review Session",
            1.5,
        ),
        CatalogEntry::with_action(
            "Your memory is excellent. To retain information for the long run, shall we schedule 'Spaced Repetition' sessions for your key subjects?",
            "Spaced Repetition Study",
            0.5,
        ),
        CatalogEntry::info(
            "Your consistency with exercise is admirable. Remember that a healthy body supports a healthy mind. Keep it up!",
        ),
        CatalogEntry::with_action(
            "You keep a great focus. To boost it even more, how about a short mindfulness session before your next intensive study block?",
            "Mindfulness Session",
            0.25,
        ),
        CatalogEntry::info(
            "You're on an excellent path! No critical suggestions for now. Your balance is your greatest strength.",
        ),
    ]
}

/// Cluster 1: socially active and hard-working. Improve efficiency, manage distractions.
pub fn socially_active() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::with_action(
            "You're investing a lot of time, great! To make it more effective, shall we schedule a study session with the Pomodoro technique (25 min focus, 5 min break)?",
            "Pomodoro Study",
            0.5,
        ),
        CatalogEntry::with_action(
            "I've noticed heavy social media use. To improve your concentration, how about a phone-free 'Deep Focus' block before your next deadline?",
            "Deep Focus Block",
            1.5,
        ),
        CatalogEntry::with_action(
            "Your effort is huge, but rest is key for memory. Shall we schedule a 15-minute break between your afternoon study blocks?",
            "Scheduled Break",
            0.25,
        ),
        CatalogEntry::with_action(
            "Your study environment matters. A tidy space makes for a tidy mind. Shall we set aside 15 minutes to organise your desk before you start?",
            "Organise Study Space",
            0.25,
        ),
        CatalogEntry::with_action(
            "I see several small tasks on your list. Shall we group them into a 'quick tasks block' to clear them all at once and feel the progress?",
            "Quick Tasks Block",
            1.0,
        ),
        CatalogEntry::info(
            "Your dedication is admirable. Consider apps that block social media during your study hours to make the most of all that effort.",
        ),
    ]
}

/// Cluster 2: high academic performers. Encourage rest to prevent burnout.
pub fn high_performers() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::with_action(
            "Your performance is exceptional, but I've noticed you sleep little. Rest is key for long-term performance. Shall we schedule a screen-free hour before bed?",
            "Disconnect Hour (no screens)",
            1.0,
        ),
        CatalogEntry::with_action(
            "You're a study machine. To avoid burnout, breaks are vital. Shall we schedule a short 15-minute active break to stretch or walk?",
            "Active Break",
            0.25,
        ),
        CatalogEntry::with_action(
            "Your dedication is impressive. Don't forget that creativity feeds on leisure. How about scheduling time for a hobby or friends this week?",
            "Hobby / Social Time",
            2.0,
        ),
        CatalogEntry::with_action(
            "High performance burns a lot of energy. Shall we schedule reminders to hydrate and have a healthy snack during your long study sessions?",
            "Hydration and Snack Break",
            0.15,
        ),
        CatalogEntry::with_action(
            "You've achieved a lot. To process your wins and avoid exhaustion, how about 10 minutes at the end of the day just to reflect or journal?",
            "Reflection Block",
            0.2,
        ),
        CatalogEntry::info(
            "Remember: sometimes the most productive thing is to do nothing. Allow yourself guilt-free free time. You've earned it!",
        ),
    ]
}

/// Cluster 3: at-risk profile. Small steps and basic organisation to build momentum.
pub fn at_risk() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::with_action(
            "Sometimes the hardest part is getting started. How about scheduling just 25 minutes for your most urgent task? A small step is a big win.",
            "Start Task (25 min)",
            0.5,
        ),
        CatalogEntry::with_action(
            "You have several pending tasks and organisation is key. Shall we schedule a 15-minute block just to plan your week?",
            "Plan the Week",
            0.25,
        ),
        CatalogEntry::with_action(
            "A big task can be overwhelming. Shall we take 10 minutes to split your 'Final Project' into smaller, manageable steps in your task list?",
            "Split Big Project",
            0.2,
        ),
        CatalogEntry::with_action(
            "After finishing a task, you deserve a reward! Shall we schedule a 15-minute break to watch a video or listen to music right after?",
            "Reward Break",
            0.25,
        ),
        CatalogEntry::info(
            "Keep going! Every small effort counts. Remember to add your tasks and habits so I can help you see your progress.",
        ),
        CatalogEntry::info(
            "Building a positive habit is powerful. How about starting with a tiny one, like 'Review notes for 5 minutes'? You can add it in the habits section.",
        ),
    ]
}

/// Users without a cluster yet.
pub fn unassigned() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::info(
            "A good plan is the first step to success. What do you want to achieve today? Add your first task.",
        ),
        CatalogEntry::info(
            "Building a good habit starts with a single day. What's the first habit you want to track?",
        ),
    ]
}
